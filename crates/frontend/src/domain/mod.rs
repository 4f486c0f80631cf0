pub mod a001_agency;
pub mod a002_item;
pub mod a003_receipt;
pub mod a004_distribution;
pub mod a005_payment;
