pub mod aggregate;

pub use aggregate::{
    projected_debt, CreatePaymentDto, Payment, PaymentListQuery, PaymentStatus,
    UpdatePaymentStatusDto,
};
