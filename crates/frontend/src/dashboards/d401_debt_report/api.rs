use crate::shared::api_utils::{get_json, with_query, ApiError};
use contracts::dashboards::d401_debt_report::{DebtReport, DebtReportQuery, DebtReportResponse};

const AGING_PATH: &str = "/finance/debts/aging/";

pub async fn get_debt_report(query: &DebtReportQuery) -> Result<Vec<DebtReport>, ApiError> {
    let path = with_query(AGING_PATH, query)?;
    let response: DebtReportResponse = get_json(&path).await?;
    Ok(response.into_vec())
}
