use serde::{Deserialize, Serialize};

use crate::domain::common::{parse_amount, AggregateRoot};

/// Mặt hàng trên kho trung tâm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: i64,
    pub item_name: String,
    pub unit: i64,
    #[serde(default)]
    pub unit_name: String,
    pub price: String,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Item {
    pub fn price_value(&self) -> f64 {
        parse_amount(&self.price)
    }

    pub fn in_stock(&self, quantity: i64) -> bool {
        quantity <= self.stock_quantity
    }

    pub fn display_label(&self) -> String {
        format!("{} ({}) - tồn {}", self.item_name, self.unit_name, self.stock_quantity)
    }
}

impl AggregateRoot for Item {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.item_id
    }

    fn code(&self) -> String {
        format!("SP{:03}", self.item_id)
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_path() -> &'static str {
        "/inventory/items/"
    }

    fn element_name() -> &'static str {
        "Mặt hàng"
    }

    fn list_name() -> &'static str {
        "Danh mục hàng hóa"
    }
}

/// Query parameters for `GET /inventory/items/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemListQuery {
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

    #[test]
    fn test_deserialize_item() {
        let json = r#"{"item_id": 4, "item_name": "Nước mắm", "unit": 2, "unit_name": "Chai",
            "price": "35000.00", "stock_quantity": 120}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.price_value(), 35_000.0);
        assert!(item.in_stock(120));
        assert!(!item.in_stock(121));
        assert_eq!(item.code(), "SP004");
        assert!(item.description.is_none());
    }
}
