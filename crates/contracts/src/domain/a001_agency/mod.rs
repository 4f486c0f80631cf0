pub mod aggregate;

pub use aggregate::{Agency, AgencyDto, AgencyListQuery, DebtLevel};
