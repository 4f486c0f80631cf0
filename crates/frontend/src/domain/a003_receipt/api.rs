//! HTTP client for `/inventory/receipts/`

use crate::shared::api_utils::{get_json, post_json, with_query, ApiError};
use contracts::domain::a003_receipt::{CreateReceiptDto, Receipt, ReceiptListQuery};
use contracts::domain::common::{AggregateRoot, ListEnvelope, Paginated};

pub async fn fetch_receipts(query: &ReceiptListQuery) -> Result<Paginated<Receipt>, ApiError> {
    let path = with_query(Receipt::collection_path(), query)?;
    let envelope: ListEnvelope<Receipt> = get_json(&path).await?;
    Ok(envelope.into_page())
}

pub async fn fetch_receipt(id: i64) -> Result<Receipt, ApiError> {
    get_json(&Receipt::item_path(id)).await
}

pub async fn create_receipt(dto: &CreateReceiptDto) -> Result<Receipt, ApiError> {
    post_json(Receipt::collection_path(), dto).await
}
