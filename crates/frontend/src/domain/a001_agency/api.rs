//! HTTP client for `/agency/`

use crate::shared::api_utils::{get_json, put_json, with_query, ApiError};
use contracts::domain::a001_agency::{Agency, AgencyDto, AgencyListQuery};
use contracts::domain::common::{AggregateRoot, Paginated};

/// Pickers load agencies in one request
const PICKER_LIMIT: usize = 500;

pub async fn fetch_agencies(query: &AgencyListQuery) -> Result<Paginated<Agency>, ApiError> {
    let path = with_query(Agency::collection_path(), query)?;
    get_json(&path).await
}

pub async fn fetch_agency(id: i64) -> Result<Agency, ApiError> {
    get_json(&Agency::item_path(id)).await
}

pub async fn update_agency(id: i64, dto: &AgencyDto) -> Result<Agency, ApiError> {
    put_json(&Agency::item_path(id), dto).await
}

/// All agencies for select boxes, sorted by name
pub async fn fetch_agency_options() -> Result<Vec<Agency>, ApiError> {
    let query = AgencyListQuery {
        limit: Some(PICKER_LIMIT),
        ..Default::default()
    };
    let mut agencies = fetch_agencies(&query).await?.results;
    agencies.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(agencies)
}
