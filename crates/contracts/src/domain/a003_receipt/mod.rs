pub mod aggregate;

pub use aggregate::{
    parse_receipt_code, receipt_code, running_total, CreateReceiptDto, CreateReceiptLine, Receipt,
    ReceiptDetail, ReceiptListQuery,
};
