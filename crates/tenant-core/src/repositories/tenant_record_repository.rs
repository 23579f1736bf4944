//! Tenant record repository trait (port)

use async_trait::async_trait;

use crate::domain::{TenantRecord, TenantSession};
use crate::error::DomainError;

/// Keyed storage for [`TenantRecord`]s. Every call runs under the credentials
/// of the supplied session; per-tenant isolation is enforced by the storage
/// layer's own policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantRecordStore: Send + Sync {
    async fn load(
        &self,
        session: &TenantSession,
        tenant_id: &str,
    ) -> Result<Option<TenantRecord>, DomainError>;

    /// Upsert: creates the record or overwrites it.
    async fn save(&self, session: &TenantSession, record: &TenantRecord) -> Result<(), DomainError>;
}
