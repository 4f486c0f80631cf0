pub mod dto;

pub use dto::{AgingBucket, DebtAgingBuckets, DebtReport, DebtReportQuery, DebtReportResponse};
