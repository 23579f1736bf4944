//! Repository traits (ports)

pub mod tenant_record_repository;

pub use tenant_record_repository::TenantRecordStore;

#[cfg(test)]
pub use tenant_record_repository::MockTenantRecordStore;
