//! HTTP client for `/inventory/items/`

use crate::shared::api_utils::{get_json, with_query, ApiError};
use contracts::domain::a002_item::{Item, ItemListQuery};
use contracts::domain::common::{AggregateRoot, ListEnvelope, Paginated};

const PICKER_LIMIT: usize = 500;

pub async fn fetch_items(query: &ItemListQuery) -> Result<Paginated<Item>, ApiError> {
    let path = with_query(Item::collection_path(), query)?;
    let envelope: ListEnvelope<Item> = get_json(&path).await?;
    Ok(envelope.into_page())
}

/// All items for product pickers
pub async fn fetch_item_options() -> Result<Vec<Item>, ApiError> {
    let query = ItemListQuery {
        limit: Some(PICKER_LIMIT),
        ..Default::default()
    };
    Ok(fetch_items(&query).await?.results)
}

/// Unit price of an item in the loaded catalogue, 0 when unknown
pub fn unit_price_of(items: &[Item], item_id: i64) -> f64 {
    items
        .iter()
        .find(|i| i.item_id == item_id)
        .map(Item::price_value)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, price: &str) -> Item {
        Item {
            item_id: id,
            item_name: format!("Item {}", id),
            unit: 1,
            unit_name: "thùng".into(),
            price: price.into(),
            stock_quantity: 10,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_unit_price_lookup() {
        let items = vec![item(1, "12000.00"), item(2, "5500.50")];
        assert_eq!(unit_price_of(&items, 2), 5500.5);
        assert_eq!(unit_price_of(&items, 9), 0.0);
    }
}
