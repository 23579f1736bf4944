//! # Tenant Core - Domain Module

pub mod session;
pub mod tenant_record;

pub use session::{ScopedCredentials, TenantSession};
pub use tenant_record::TenantRecord;
