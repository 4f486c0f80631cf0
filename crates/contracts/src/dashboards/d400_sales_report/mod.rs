pub mod dto;

pub use dto::{SalesReportItem, SalesReportQuery, SalesReportSummary};
