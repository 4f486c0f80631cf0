use serde::{Deserialize, Serialize};

use crate::domain::common::{parse_amount, AggregateRoot};
use crate::shared::validation::ValidationErrors;

// ============================================================================
// Aggregate Root
// ============================================================================

/// Đại lý: downstream reseller with a debt ledger and a credit limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub agency_type: String,
    #[serde(default)]
    pub type_id: Option<i64>,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(alias = "taxCode", default)]
    pub tax_code: Option<String>,
    /// Decimal string as sent by the backend
    pub current_debt: String,
    pub debt_limit: f64,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Уровень задолженности относительно лимита
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtLevel {
    Normal,
    Warning,
    Critical,
}

impl DebtLevel {
    /// Above 80% of the limit is critical, above 60% a warning.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.8 {
            DebtLevel::Critical
        } else if ratio > 0.6 {
            DebtLevel::Warning
        } else {
            DebtLevel::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DebtLevel::Normal => "Bình thường",
            DebtLevel::Warning => "Cần chú ý",
            DebtLevel::Critical => "Sắp vượt hạn mức",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            DebtLevel::Normal => "badge badge--success",
            DebtLevel::Warning => "badge badge--warning",
            DebtLevel::Critical => "badge badge--error",
        }
    }
}

impl Agency {
    pub fn current_debt_value(&self) -> f64 {
        parse_amount(&self.current_debt)
    }

    /// Debt as a fraction of the limit; a zero limit is treated as 1.
    pub fn debt_ratio(&self) -> f64 {
        let limit = if self.debt_limit > 0.0 {
            self.debt_limit
        } else {
            1.0
        };
        self.current_debt_value() / limit
    }

    pub fn debt_level(&self) -> DebtLevel {
        DebtLevel::from_ratio(self.debt_ratio())
    }

    /// Remaining credit before the limit is reached, never negative
    pub fn available_credit(&self) -> f64 {
        (self.debt_limit - self.current_debt_value()).max(0.0)
    }

    /// Option label used by agency pickers: "DL001 - Name (District)"
    pub fn display_label(&self) -> String {
        if self.district.is_empty() {
            format!("{} - {}", self.code, self.name)
        } else {
            format!("{} - {} ({})", self.code, self.name, self.district)
        }
    }

    pub fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        if filter.is_empty() {
            return true;
        }
        self.code.to_lowercase().contains(&filter)
            || self.name.to_lowercase().contains(&filter)
            || self.address.to_lowercase().contains(&filter)
            || self.district.to_lowercase().contains(&filter)
            || self.phone.contains(&filter)
            || self.email.to_lowercase().contains(&filter)
    }

    pub fn to_dto(&self) -> AgencyDto {
        AgencyDto {
            name: self.name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            owner: self.owner.clone(),
            tax_code: self.tax_code.clone(),
            is_active: self.is_active,
        }
    }
}

impl AggregateRoot for Agency {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn code(&self) -> String {
        self.code.clone()
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_path() -> &'static str {
        "/agency/"
    }

    fn element_name() -> &'static str {
        "Đại lý"
    }

    fn list_name() -> &'static str {
        "Danh sách đại lý"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Editable agency fields sent with `PUT /agency/{id}/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgencyDto {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
    pub is_active: bool,
}

impl AgencyDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            !self.name.trim().is_empty(),
            "name",
            "Tên đại lý không được để trống",
        );
        errors.check(
            !self.address.trim().is_empty(),
            "address",
            "Địa chỉ không được để trống",
        );
        let phone = self.phone.replace(' ', "");
        errors.check(
            !phone.is_empty() && phone.chars().all(|c| c.is_ascii_digit()),
            "phone",
            "Số điện thoại không hợp lệ",
        );
        if !self.email.trim().is_empty() {
            errors.check(
                crate::system::auth::is_email_like(&self.email),
                "email",
                "Email không hợp lệ",
            );
        }
        errors.into_result()
    }
}

/// Query parameters for `GET /agency/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgencyListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agency(debt: &str, limit: f64) -> Agency {
        Agency {
            id: 1,
            code: "DL001".into(),
            name: "Đại lý Hà Nội".into(),
            agency_type: "Loại 1".into(),
            type_id: Some(1),
            district: "Quận 1".into(),
            district_id: Some(1),
            address: "123 Nguyễn Văn Linh".into(),
            phone: "0901234567".into(),
            email: "hanoi@example.com".into(),
            owner: None,
            tax_code: None,
            current_debt: debt.into(),
            debt_limit: limit,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_debt_level_thresholds() {
        assert_eq!(agency("500000.00", 1_000_000.0).debt_level(), DebtLevel::Normal);
        assert_eq!(agency("600000.00", 1_000_000.0).debt_level(), DebtLevel::Normal);
        assert_eq!(agency("700000.00", 1_000_000.0).debt_level(), DebtLevel::Warning);
        assert_eq!(agency("900000.00", 1_000_000.0).debt_level(), DebtLevel::Critical);
    }

    #[test]
    fn test_zero_limit_counts_as_one() {
        let a = agency("0.50", 0.0);
        assert!((a.debt_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_available_credit_never_negative() {
        assert_eq!(agency("1500000", 1_000_000.0).available_credit(), 0.0);
        assert_eq!(agency("250000", 1_000_000.0).available_credit(), 750_000.0);
    }

    #[test]
    fn test_deserialize_backend_agency() {
        let json = r#"{
            "id": 3, "code": "DL003", "name": "Đại lý 3", "type": "Loại 2", "type_id": 2,
            "district": "Quận 7", "district_id": 7, "address": "45 Lê Lợi",
            "phone": "0902345678", "email": "dl3@example.com",
            "current_debt": "2500000.00", "debt_limit": 5000000,
            "is_active": true, "created_at": "2024-01-15T08:00:00Z", "updated_at": null
        }"#;
        let a: Agency = serde_json::from_str(json).unwrap();
        assert_eq!(a.agency_type, "Loại 2");
        assert_eq!(a.current_debt_value(), 2_500_000.0);
        assert_eq!(a.display_label(), "DL003 - Đại lý 3 (Quận 7)");
    }

    #[test]
    fn test_matches_filter() {
        let a = agency("0", 1.0);
        assert!(a.matches_filter("hà nội"));
        assert!(a.matches_filter("0901"));
        assert!(a.matches_filter("  "));
        assert!(!a.matches_filter("sài gòn"));
    }

    #[test]
    fn test_dto_validation() {
        let mut dto = agency("0", 1.0).to_dto();
        assert!(dto.validate().is_ok());
        dto.phone = "09-01".into();
        dto.email = "nope".into();
        let errors = dto.validate().unwrap_err();
        assert!(errors.for_field("phone").is_some());
        assert!(errors.for_field("email").is_some());
    }

    #[test]
    fn test_tax_code_is_snake_case_on_the_wire() {
        let mut a = agency("0", 1.0);
        a.tax_code = Some("0312345678".into());
        let body = serde_json::to_value(a.to_dto()).unwrap();
        assert_eq!(body["tax_code"], "0312345678");
        assert!(body.get("taxCode").is_none());

        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["tax_code"], "0312345678");
        let mut legacy = json.clone();
        let value = legacy.as_object_mut().unwrap().remove("tax_code").unwrap();
        legacy["taxCode"] = value;
        let back: Agency = serde_json::from_value(legacy).unwrap();
        assert_eq!(back.tax_code.as_deref(), Some("0312345678"));
    }

    #[test]
    fn test_list_tab_key() {
        assert_eq!(Agency::list_tab_key(), "a001_agency");
        assert_eq!(Agency::item_path(5), "/agency/5/");
    }
}
