//! DynamoDB repository implementations

pub mod tenant_record_repo_impl;

pub use tenant_record_repo_impl::DynamoTenantRecordStore;
