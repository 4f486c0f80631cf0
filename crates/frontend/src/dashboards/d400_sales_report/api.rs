use crate::shared::api_utils::{get_json, with_query, ApiError};
use contracts::dashboards::d400_sales_report::dto::sort_by_month;
use contracts::dashboards::d400_sales_report::{SalesReportItem, SalesReportQuery};

const SALES_PATH: &str = "/finance/debts/sales/";

/// Monthly sales rows, oldest month first
pub async fn get_sales_report(query: &SalesReportQuery) -> Result<Vec<SalesReportItem>, ApiError> {
    let path = with_query(SALES_PATH, query)?;
    let mut items: Vec<SalesReportItem> = get_json(&path).await?;
    sort_by_month(&mut items);
    Ok(items)
}
