use serde::{Deserialize, Serialize};

use crate::domain::common::{de_amount, AggregateRoot};
use crate::shared::validation::ValidationErrors;

// ============================================================================
// Status
// ============================================================================

/// Trạng thái yêu cầu xuất hàng
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionStatus {
    Processing,
    Postponed,
    Confirmed,
    Cancelled,
}

impl DistributionStatus {
    pub const ALL: [DistributionStatus; 4] = [
        DistributionStatus::Processing,
        DistributionStatus::Postponed,
        DistributionStatus::Confirmed,
        DistributionStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionStatus::Processing => "processing",
            DistributionStatus::Postponed => "postponed",
            DistributionStatus::Confirmed => "confirmed",
            DistributionStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DistributionStatus::Processing => "Đang xử lý",
            DistributionStatus::Postponed => "Tạm hoãn",
            DistributionStatus::Confirmed => "Đã xác nhận",
            DistributionStatus::Cancelled => "Đã hủy",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            DistributionStatus::Processing => "badge badge--info",
            DistributionStatus::Postponed => "badge badge--warning",
            DistributionStatus::Confirmed => "badge badge--success",
            DistributionStatus::Cancelled => "badge badge--neutral",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DistributionStatus::Confirmed | DistributionStatus::Cancelled
        )
    }

    /// Moves only toward a terminal state. `postponed` is a one-time detour
    /// that resumes straight to `confirmed` or ends in `cancelled`.
    pub fn can_transition_to(&self, next: DistributionStatus) -> bool {
        use DistributionStatus::*;
        matches!(
            (*self, next),
            (Processing, Postponed | Confirmed | Cancelled) | (Postponed, Confirmed | Cancelled)
        )
    }

    /// Statuses offered by the status-update dialog for a record in `self`
    pub fn allowed_targets(&self) -> Vec<DistributionStatus> {
        Self::ALL
            .into_iter()
            .filter(|next| self.can_transition_to(*next))
            .collect()
    }
}

impl std::fmt::Display for DistributionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Phiếu xuất (issue) as returned by `/inventory/issues/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRequest {
    pub issue_id: i64,
    pub issue_date: String,
    pub agency_id: i64,
    #[serde(default)]
    pub agency_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(deserialize_with = "de_amount")]
    pub total_amount: f64,
    pub status: DistributionStatus,
    #[serde(default)]
    pub status_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<IssueDetail>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueDetail {
    pub issue_detail_id: i64,
    pub item: i64,
    #[serde(default)]
    pub item_name: String,
    pub quantity: i64,
    #[serde(deserialize_with = "de_amount")]
    pub unit_price: f64,
    #[serde(deserialize_with = "de_amount")]
    pub line_total: f64,
}

/// Mã phiếu xuất: "PXK" + id zero-padded to 3 digits
pub fn issue_code(id: i64) -> String {
    format!("PXK{:03}", id)
}

impl DistributionRequest {
    pub fn agency_label(&self) -> String {
        self.agency_name
            .clone()
            .unwrap_or_else(|| format!("Đại lý #{}", self.agency_id))
    }

    pub fn details(&self) -> &[IssueDetail] {
        self.details.as_deref().unwrap_or_default()
    }
}

impl AggregateRoot for DistributionRequest {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.issue_id
    }

    fn code(&self) -> String {
        issue_code(self.issue_id)
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_path() -> &'static str {
        "/inventory/issues/"
    }

    fn element_name() -> &'static str {
        "Yêu cầu xuất hàng"
    }

    fn list_name() -> &'static str {
        "Danh sách xuất hàng"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionItem {
    pub item: i64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

/// Body of `POST /inventory/issues/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDistributionDto {
    pub agency_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    pub items: Vec<DistributionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
}

pub const MIN_ADDRESS_LEN: usize = 10;

impl CreateDistributionDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(self.agency_id > 0, "agency_id", "Vui lòng chọn đại lý");
        errors.check(
            !self.items.is_empty(),
            "items",
            "Vui lòng chọn sản phẩm",
        );
        errors.check(
            self.items.iter().all(|i| i.item > 0 && i.quantity > 0),
            "quantity",
            "Số lượng phải lớn hơn 0",
        );
        if let Some(address) = &self.delivery_address {
            errors.check(
                address.trim().chars().count() >= MIN_ADDRESS_LEN,
                "delivery_address",
                "Địa chỉ phải có ít nhất 10 ký tự",
            );
        }
        errors.into_result()
    }
}

/// Body of `PATCH /inventory/issues/{id}/update_status/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDistributionStatusDto {
    pub status: DistributionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
}

impl UpdateDistributionStatusDto {
    /// Builds the body only for transitions the local state machine accepts.
    pub fn for_transition(
        current: DistributionStatus,
        next: DistributionStatus,
        reason: &str,
    ) -> Result<Self, String> {
        if !current.can_transition_to(next) {
            return Err(format!(
                "Không thể chuyển trạng thái từ \"{}\" sang \"{}\"",
                current.label(),
                next.label()
            ));
        }
        let reason = reason.trim();
        Ok(Self {
            status: next,
            status_reason: (!reason.is_empty()).then(|| reason.to_string()),
        })
    }
}

/// Query parameters for `GET /inventory/issues/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use DistributionStatus::*;

    #[test]
    fn test_terminal_states_are_final() {
        for next in DistributionStatus::ALL {
            assert!(!Confirmed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_nothing_returns_to_processing() {
        for from in DistributionStatus::ALL {
            assert!(!from.can_transition_to(Processing));
        }
        assert_eq!(Processing.allowed_targets(), vec![Postponed, Confirmed, Cancelled]);
        assert_eq!(Postponed.allowed_targets(), vec![Confirmed, Cancelled]);
        assert!(UpdateDistributionStatusDto::for_transition(Postponed, Processing, "").is_err());
    }

    #[test]
    fn test_postponed_is_visited_at_most_once() {
        fn walk(path: &mut Vec<DistributionStatus>) {
            let current = *path.last().unwrap();
            assert!(path.iter().filter(|s| **s == Postponed).count() <= 1, "{path:?}");
            assert!(path.len() <= 3, "{path:?}");
            for next in current.allowed_targets() {
                path.push(next);
                walk(path);
                path.pop();
            }
        }
        walk(&mut vec![Processing]);
        walk(&mut vec![Postponed]);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&Postponed).unwrap(), "\"postponed\"");
        assert_eq!(DistributionStatus::from_code("cancelled"), Some(Cancelled));
        assert_eq!(DistributionStatus::from_code("unknown"), None);
    }

    #[test]
    fn test_update_dto_refuses_invalid_transition() {
        assert!(UpdateDistributionStatusDto::for_transition(Confirmed, Cancelled, "x").is_err());
        let dto = UpdateDistributionStatusDto::for_transition(Processing, Postponed, "  ").unwrap();
        assert_eq!(dto.status_reason, None);
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            serde_json::json!({"status": "postponed"})
        );
    }

    #[test]
    fn test_create_dto_validation() {
        let mut dto = CreateDistributionDto {
            agency_id: 1,
            issue_date: None,
            items: vec![DistributionItem { item: 2, quantity: 1, unit_price: None }],
            delivery_address: Some("12 Lê Lợi, Q1".into()),
        };
        assert!(dto.validate().is_ok());
        dto.delivery_address = Some("  ngắn  ".into());
        dto.items[0].quantity = 0;
        let errors = dto.validate().unwrap_err();
        assert!(errors.for_field("delivery_address").is_some());
        assert!(errors.for_field("quantity").is_some());
    }

    #[test]
    fn test_deserialize_issue() {
        let json = r#"{"issue_id": 12, "issue_date": "2024-07-02", "agency_id": 3,
            "user_id": 1, "total_amount": "500000.00", "status": "processing"}"#;
        let issue: DistributionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(issue.status, Processing);
        assert_eq!(issue.agency_label(), "Đại lý #3");
        assert!(issue.details().is_empty());
        assert_eq!(issue.code(), "PXK012");
    }
}
