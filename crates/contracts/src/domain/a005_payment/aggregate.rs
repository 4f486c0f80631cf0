use serde::{Deserialize, Serialize};

use crate::domain::common::{parse_amount, AggregateRoot};
use crate::shared::validation::ValidationErrors;

/// Статус phiếu thu. Unknown backend values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Cancelled,
    Other(String),
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => PaymentStatus::Pending,
            "completed" => PaymentStatus::Completed,
            "cancelled" => PaymentStatus::Cancelled,
            _ => PaymentStatus::Other(value),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        value.as_str().to_string()
    }
}

impl PaymentStatus {
    pub const KNOWN: [PaymentStatus; 3] = [
        PaymentStatus::Pending,
        PaymentStatus::Completed,
        PaymentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> String {
        match self {
            PaymentStatus::Pending => "Chờ xử lý".to_string(),
            PaymentStatus::Completed => "Hoàn thành".to_string(),
            PaymentStatus::Cancelled => "Đã hủy".to_string(),
            PaymentStatus::Other(raw) => raw.clone(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "badge badge--warning",
            PaymentStatus::Completed => "badge badge--success",
            PaymentStatus::Cancelled => "badge badge--error",
            PaymentStatus::Other(_) => "badge badge--neutral",
        }
    }
}

/// Phiếu thu tiền
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: i64,
    pub payment_date: String,
    pub agency_id: i64,
    #[serde(default)]
    pub agency_name: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_name: String,
    pub amount_collected: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub status_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Payment {
    pub fn amount_value(&self) -> f64 {
        parse_amount(&self.amount_collected)
    }

    pub fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        filter.is_empty()
            || self.agency_name.to_lowercase().contains(&filter)
            || self.user_name.to_lowercase().contains(&filter)
            || self.code().to_lowercase().contains(&filter)
    }
}

impl AggregateRoot for Payment {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.payment_id
    }

    fn code(&self) -> String {
        format!("PT{:03}", self.payment_id)
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_path() -> &'static str {
        "/finance/payments/"
    }

    fn element_name() -> &'static str {
        "Phiếu thu"
    }

    fn list_name() -> &'static str {
        "Thu tiền công nợ"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Body of `POST /finance/payments/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentDto {
    pub agency_id: i64,
    pub amount_collected: f64,
    pub payment_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl CreatePaymentDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(self.agency_id > 0, "agency_id", "Vui lòng chọn đại lý");
        errors.check(
            self.amount_collected.is_finite() && self.amount_collected > 0.0,
            "amount_collected",
            "Số tiền thu phải lớn hơn 0",
        );
        errors.check(
            !self.payment_date.trim().is_empty(),
            "payment_date",
            "Vui lòng chọn ngày thu",
        );
        errors.into_result()
    }

    /// Soft warning: the form still submits.
    pub fn overpayment_warning(&self, current_debt: f64) -> Option<String> {
        (self.amount_collected > current_debt).then(|| {
            "Số tiền thu lớn hơn công nợ hiện tại của đại lý".to_string()
        })
    }
}

/// Debt remaining after collecting `amount`; may go negative on overpayment.
pub fn projected_debt(current_debt: f64, amount: f64) -> f64 {
    current_debt - amount
}

/// Body of `PATCH /finance/payments/{id}/update_status/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePaymentStatusDto {
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_preserved() {
        let s: PaymentStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(s, PaymentStatus::Other("refunded".into()));
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"refunded\"");
        let known: PaymentStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(known, PaymentStatus::Completed);
    }

    #[test]
    fn test_create_payment_validation() {
        let dto = CreatePaymentDto {
            agency_id: 1,
            amount_collected: 0.0,
            payment_date: "2024-07-10".into(),
            user_id: None,
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert!(errors.for_field("amount_collected").is_some());
        assert!(CreatePaymentDto { amount_collected: 10.0, ..dto }.validate().is_ok());
    }

    #[test]
    fn test_overpayment_warns_but_projects() {
        let dto = CreatePaymentDto {
            agency_id: 1,
            amount_collected: 1_200_000.0,
            payment_date: "2024-07-10".into(),
            user_id: Some(4),
        };
        assert!(dto.overpayment_warning(1_000_000.0).is_some());
        assert!(dto.overpayment_warning(2_000_000.0).is_none());
        assert_eq!(projected_debt(1_000_000.0, 1_200_000.0), -200_000.0);
    }

    #[test]
    fn test_deserialize_payment() {
        let json = r#"{"payment_id": 9, "payment_date": "2024-07-10", "agency_id": 2,
            "agency_name": "Đại lý Sài Gòn", "user_id": 1, "user_name": "admin",
            "amount_collected": "2500000.00", "status": "pending",
            "status_reason": null, "created_at": null}"#;
        let p: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(p.amount_value(), 2_500_000.0);
        assert_eq!(p.status, PaymentStatus::Pending);
        assert!(p.matches_filter("sài gòn"));
        assert!(p.matches_filter("pt009"));
    }
}
