pub mod badge;
pub mod form_field;

pub use badge::{Badge, DebtLevelBadge, DistributionStatusBadge, PaymentStatusBadge};
pub use form_field::{ErrorList, FormField};
