//! Shared wire contracts between the dashboard frontend and the REST backend.
//!
//! Everything in this crate is plain data plus pure rules (validation,
//! classification, report math, the status simulator) so it compiles for
//! both native targets and `wasm32`.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
