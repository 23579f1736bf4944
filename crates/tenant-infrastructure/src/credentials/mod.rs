//! Tenant credential vending

pub mod sts_vendor;
pub mod token_vending;

pub use sts_vendor::StsCredentialVendor;
pub use token_vending::{CredentialVendor, TokenVendingMachine};
