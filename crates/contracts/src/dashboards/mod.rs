pub mod d400_sales_report;
pub mod d401_debt_report;
