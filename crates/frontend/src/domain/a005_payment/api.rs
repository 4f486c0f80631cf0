//! HTTP client for `/finance/payments/`

use crate::shared::api_utils::{get_json, patch_json, post_json, with_query, ApiError};
use contracts::domain::a005_payment::{
    CreatePaymentDto, Payment, PaymentListQuery, UpdatePaymentStatusDto,
};
use contracts::domain::common::{AggregateRoot, ListEnvelope};

pub async fn fetch_payments(query: &PaymentListQuery) -> Result<Vec<Payment>, ApiError> {
    let path = with_query(Payment::collection_path(), query)?;
    let envelope: ListEnvelope<Payment> = get_json(&path).await?;
    Ok(envelope.into_page().results)
}

pub async fn create_payment(dto: &CreatePaymentDto) -> Result<Payment, ApiError> {
    post_json(Payment::collection_path(), dto).await
}

pub async fn update_payment_status(
    id: i64,
    dto: &UpdatePaymentStatusDto,
) -> Result<Payment, ApiError> {
    let path = format!("{}update_status/", Payment::item_path(id));
    patch_json(&path, dto).await
}
