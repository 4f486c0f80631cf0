mod dashboard;

pub use dashboard::SalesReportDashboard;
