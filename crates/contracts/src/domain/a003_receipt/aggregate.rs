use serde::{Deserialize, Serialize};

use crate::domain::common::{de_amount, AggregateRoot};
use crate::shared::validation::ValidationErrors;

const RECEIPT_PREFIX: &str = "PX";

/// Phiếu nhập hàng vào kho trung tâm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub receipt_id: i64,
    pub receipt_date: String,
    pub agency_id: i64,
    #[serde(default)]
    pub agency_name: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_name: String,
    #[serde(deserialize_with = "de_amount")]
    pub total_amount: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub details: Vec<ReceiptDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDetail {
    pub receipt_detail_id: i64,
    pub item: i64,
    #[serde(default)]
    pub item_name: String,
    pub quantity: i64,
    #[serde(deserialize_with = "de_amount")]
    pub unit_price: f64,
    #[serde(deserialize_with = "de_amount")]
    pub line_total: f64,
}

/// "PX" + id padded to three digits
pub fn receipt_code(id: i64) -> String {
    format!("{}{:03}", RECEIPT_PREFIX, id)
}

/// Accepts both display codes ("PX007", "px7") and bare ids ("7").
pub fn parse_receipt_code(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let digits = match trimmed.get(..RECEIPT_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(RECEIPT_PREFIX) => {
            &trimmed[RECEIPT_PREFIX.len()..]
        }
        _ => trimmed,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl Receipt {
    pub fn item_count(&self) -> usize {
        self.details.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.details.iter().map(|d| d.quantity).sum()
    }

    pub fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        filter.is_empty()
            || receipt_code(self.receipt_id).to_lowercase().contains(&filter)
            || self.agency_name.to_lowercase().contains(&filter)
            || self.user_name.to_lowercase().contains(&filter)
    }
}

impl AggregateRoot for Receipt {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.receipt_id
    }

    fn code(&self) -> String {
        receipt_code(self.receipt_id)
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_path() -> &'static str {
        "/inventory/receipts/"
    }

    fn element_name() -> &'static str {
        "Phiếu nhập"
    }

    fn list_name() -> &'static str {
        "Phiếu nhập kho"
    }
}

// ============================================================================
// Create form
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateReceiptLine {
    pub item: i64,
    pub quantity: i64,
}

impl CreateReceiptLine {
    pub fn is_filled(&self) -> bool {
        self.item > 0 && self.quantity > 0
    }
}

/// Body of `POST /inventory/receipts/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateReceiptDto {
    pub agency_id: i64,
    pub receipt_date: String,
    pub details: Vec<CreateReceiptLine>,
}

impl CreateReceiptDto {
    /// Drops incomplete lines, then validates what remains.
    pub fn prepare(mut self) -> Result<Self, ValidationErrors> {
        self.details.retain(CreateReceiptLine::is_filled);
        let mut errors = ValidationErrors::new();
        errors.check(self.agency_id > 0, "agency_id", "Vui lòng chọn đại lý");
        errors.check(
            !self.receipt_date.trim().is_empty(),
            "receipt_date",
            "Vui lòng chọn ngày nhập",
        );
        errors.check(
            !self.details.is_empty(),
            "details",
            "Vui lòng thêm ít nhất một sản phẩm",
        );
        errors.into_result().map(|_| self)
    }
}

/// Running total for the form: quantity × unit price per line.
pub fn running_total(lines: &[(i64, f64)]) -> f64 {
    lines
        .iter()
        .filter(|(qty, _)| *qty > 0)
        .map(|(qty, price)| *qty as f64 * price)
        .sum()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_code_padding() {
        assert_eq!(receipt_code(7), "PX007");
        assert_eq!(receipt_code(1234), "PX1234");
    }

    #[test]
    fn test_parse_receipt_code() {
        assert_eq!(parse_receipt_code("PX007"), Some(7));
        assert_eq!(parse_receipt_code("7"), Some(7));
        assert_eq!(parse_receipt_code(" px12 "), Some(12));
        assert_eq!(parse_receipt_code("PX"), None);
        assert_eq!(parse_receipt_code("PX-1"), None);
        assert_eq!(parse_receipt_code("abc"), None);
    }

    #[test]
    fn test_prepare_filters_incomplete_lines() {
        let dto = CreateReceiptDto {
            agency_id: 2,
            receipt_date: "2024-07-01".into(),
            details: vec![
                CreateReceiptLine { item: 1, quantity: 3 },
                CreateReceiptLine { item: 0, quantity: 3 },
                CreateReceiptLine { item: 2, quantity: 0 },
            ],
        };
        let prepared = dto.prepare().unwrap();
        assert_eq!(prepared.details, vec![CreateReceiptLine { item: 1, quantity: 3 }]);
    }

    #[test]
    fn test_prepare_requires_fields() {
        let errors = CreateReceiptDto {
            agency_id: 0,
            receipt_date: " ".into(),
            details: vec![CreateReceiptLine { item: 0, quantity: 0 }],
        }
        .prepare()
        .unwrap_err();
        assert_eq!(errors.errors.len(), 3);
        assert!(errors.for_field("details").is_some());
    }

    #[test]
    fn test_running_total() {
        assert_eq!(running_total(&[(2, 1000.0), (0, 500.0), (3, 10.0)]), 2030.0);
    }

    #[test]
    fn test_deserialize_receipt_with_string_amounts() {
        let json = r#"{"receipt_id": 7, "receipt_date": "2024-07-01", "agency_id": 1,
            "agency_name": "DL1", "user_id": 3, "user_name": "staff",
            "total_amount": "150000.00", "details": [
              {"receipt_detail_id": 1, "item": 4, "item_name": "Gạo", "quantity": 3,
               "unit_price": "50000.00", "line_total": "150000.00"}]}"#;
        let r: Receipt = serde_json::from_str(json).unwrap();
        assert_eq!(r.code(), "PX007");
        assert_eq!(r.total_amount, 150_000.0);
        assert_eq!(r.total_quantity(), 3);
        assert!(r.matches_filter("px00"));
    }
}
