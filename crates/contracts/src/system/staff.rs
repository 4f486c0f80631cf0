use serde::{Deserialize, Serialize};

/// Связь пользователя-сотрудника с đại lý
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffAgencyMap {
    pub staff_id: i64,
    pub agency_id: i64,
}

/// Response of `GET /staff-agency/?staff_id={id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffAgencyList {
    #[serde(default)]
    pub results: Vec<StaffAgencyMap>,
}

impl StaffAgencyList {
    /// Agency of the first mapping, if any
    pub fn first_agency(&self) -> Option<i64> {
        self.results.first().map(|m| m.agency_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffAgencyQuery {
    pub staff_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_agency() {
        let list: StaffAgencyList = serde_json::from_str(
            r#"{"results": [{"staff_id": 4, "agency_id": 9}, {"staff_id": 4, "agency_id": 2}]}"#,
        )
        .unwrap();
        assert_eq!(list.first_agency(), Some(9));
        let empty: StaffAgencyList = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_agency(), None);
    }
}
