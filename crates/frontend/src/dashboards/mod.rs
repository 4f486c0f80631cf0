pub mod d400_sales_report;
pub mod d401_debt_report;

pub use d400_sales_report::ui::SalesReportDashboard;
pub use d401_debt_report::ui::DebtReportDashboard;
