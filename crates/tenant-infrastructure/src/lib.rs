//! # Tenant Infrastructure
//!
//! AWS-backed adapters for the core ports: DynamoDB record store, S3 template
//! source with an on-disk archive cache, and the STS token vending machine.

pub mod aws;
pub mod credentials;
pub mod database;
pub mod storage;
pub mod templates;

pub use credentials::{StsCredentialVendor, TokenVendingMachine};
pub use database::DynamoTenantRecordStore;
pub use storage::S3TemplateSource;
pub use templates::{ArchiveTemplateCache, TemplateSource};
