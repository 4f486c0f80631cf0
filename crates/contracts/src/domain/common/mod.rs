//! Common types and traits for all aggregates

pub mod aggregate_root;
pub mod money;
pub mod page;

pub use aggregate_root::AggregateRoot;
pub use money::{amount_to_wire, de_amount, parse_amount};
pub use page::{total_pages, ListEnvelope, PageRequest, Paginated};
