mod dashboard;

pub use dashboard::DebtReportDashboard;
