pub mod api_error;
pub mod validation;

pub use api_error::BackendError;
pub use validation::{FieldError, ValidationErrors};
