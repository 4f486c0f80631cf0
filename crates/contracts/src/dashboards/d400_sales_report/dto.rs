use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::de_amount;
use crate::shared::validation::ValidationErrors;

/// Filter for `GET /finance/debts/sales/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesReportQuery {
    /// Start date "YYYY-MM-DD"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// End date "YYYY-MM-DD"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<i64>,
}

impl SalesReportQuery {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let from = self.from.as_deref().map(parse_date);
        let to = self.to.as_deref().map(parse_date);
        if let Some(None) = from {
            errors.push("from", "Ngày bắt đầu không hợp lệ");
        }
        if let Some(None) = to {
            errors.push("to", "Ngày kết thúc không hợp lệ");
        }
        if let (Some(Some(from)), Some(Some(to))) = (from, to) {
            errors.check(from <= to, "to", "Ngày kết thúc phải sau ngày bắt đầu");
        }
        errors.into_result()
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// One month of sales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReportItem {
    /// "YYYY-MM"
    pub month: String,
    #[serde(deserialize_with = "de_amount")]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_issues: i64,
    #[serde(deserialize_with = "de_amount", default)]
    pub new_debt_generated: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesReportSummary {
    pub total_revenue: f64,
    pub total_issues: i64,
    pub total_new_debt: f64,
    /// Month with the highest revenue; the earliest one wins a tie
    pub best_month: Option<String>,
    pub average_revenue: f64,
}

impl SalesReportSummary {
    pub fn from_items(items: &[SalesReportItem]) -> Self {
        let mut summary = SalesReportSummary::default();
        let mut best: Option<&SalesReportItem> = None;
        for item in items {
            summary.total_revenue += item.total_revenue;
            summary.total_issues += item.total_issues;
            summary.total_new_debt += item.new_debt_generated;
            if best.map_or(true, |b| item.total_revenue > b.total_revenue) {
                best = Some(item);
            }
        }
        summary.best_month = best.map(|b| b.month.clone());
        if !items.is_empty() {
            summary.average_revenue = summary.total_revenue / items.len() as f64;
        }
        summary
    }
}

/// "2024-07" → "07/2024"
pub fn month_label(month: &str) -> String {
    match month.split_once('-') {
        Some((year, m)) => format!("{}/{}", m, year),
        None => month.to_string(),
    }
}

/// Sorts rows by month ascending; the backend does not guarantee an order.
pub fn sort_by_month(items: &mut [SalesReportItem]) {
    items.sort_by(|a, b| a.month.cmp(&b.month));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(month: &str, revenue: f64, issues: i64, debt: f64) -> SalesReportItem {
        SalesReportItem {
            month: month.into(),
            total_revenue: revenue,
            total_issues: issues,
            new_debt_generated: debt,
        }
    }

    #[test]
    fn test_summary_totals_and_best_month() {
        let items = vec![
            item("2024-05", 100.0, 2, 10.0),
            item("2024-06", 300.0, 5, 30.0),
            item("2024-07", 300.0, 1, 0.0),
        ];
        let s = SalesReportSummary::from_items(&items);
        assert_eq!(s.total_revenue, 700.0);
        assert_eq!(s.total_issues, 8);
        assert_eq!(s.total_new_debt, 40.0);
        assert_eq!(s.best_month.as_deref(), Some("2024-06"));
    }

    #[test]
    fn test_empty_summary() {
        let s = SalesReportSummary::from_items(&[]);
        assert_eq!(s.best_month, None);
        assert_eq!(s.average_revenue, 0.0);
    }

    #[test]
    fn test_query_date_range() {
        let q = SalesReportQuery {
            from: Some("2024-07-01".into()),
            to: Some("2024-06-01".into()),
            agency_id: None,
        };
        assert!(q.validate().unwrap_err().for_field("to").is_some());
        let q = SalesReportQuery {
            from: Some("01/07/2024".into()),
            ..Default::default()
        };
        assert!(q.validate().unwrap_err().for_field("from").is_some());
        assert!(SalesReportQuery::default().validate().is_ok());
    }

    #[test]
    fn test_decimal_strings_accepted() {
        let json = r#"[{"month": "2024-07", "total_revenue": "1500000.50", "total_issues": 3,
            "new_debt_generated": 200000}]"#;
        let items: Vec<SalesReportItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].total_revenue, 1_500_000.5);
        assert_eq!(month_label(&items[0].month), "07/2024");
    }

    #[test]
    fn test_sort_by_month() {
        let mut items = vec![item("2024-07", 1.0, 0, 0.0), item("2023-12", 1.0, 0, 0.0)];
        sort_by_month(&mut items);
        assert_eq!(items[0].month, "2023-12");
    }
}
