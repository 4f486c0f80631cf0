//! HTTP client for `/inventory/issues/`

use crate::shared::api_utils::{get_json, patch_json, post_json, with_query, ApiError};
use contracts::domain::a004_distribution::{
    CreateDistributionDto, DistributionListQuery, DistributionRequest, UpdateDistributionStatusDto,
};
use contracts::domain::common::{AggregateRoot, ListEnvelope, Paginated};

pub async fn fetch_distributions(
    query: &DistributionListQuery,
) -> Result<Paginated<DistributionRequest>, ApiError> {
    let path = with_query(DistributionRequest::collection_path(), query)?;
    let envelope: ListEnvelope<DistributionRequest> = get_json(&path).await?;
    Ok(envelope.into_page())
}

pub async fn fetch_distribution(id: i64) -> Result<DistributionRequest, ApiError> {
    get_json(&DistributionRequest::item_path(id)).await
}

pub async fn create_distribution(
    dto: &CreateDistributionDto,
) -> Result<DistributionRequest, ApiError> {
    post_json(DistributionRequest::collection_path(), dto).await
}

fn status_path(id: i64) -> String {
    format!("{}update_status/", DistributionRequest::item_path(id))
}

pub async fn update_distribution_status(
    id: i64,
    dto: &UpdateDistributionStatusDto,
) -> Result<DistributionRequest, ApiError> {
    patch_json(&status_path(id), dto).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_path() {
        assert_eq!(status_path(14), "/inventory/issues/14/update_status/");
    }
}
