// ============================================================================
// Tenant Core - Tenant Service
// File: crates/tenant-core/src/services/tenant_service.rs
// ============================================================================
//! Read and upsert of the per-tenant record

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{TenantRecord, TenantSession};
use crate::error::DomainError;
use crate::repositories::TenantRecordStore;

pub struct TenantService<R: TenantRecordStore + ?Sized> {
    repo: Arc<R>,
}

impl<R: TenantRecordStore + ?Sized> TenantService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Current record of the session's tenant, or the empty shape if the
    /// tenant has never been written.
    pub async fn get(&self, session: &TenantSession) -> Result<TenantRecord, DomainError> {
        let record = self.repo.load(session, &session.tenant_id).await?;

        match record {
            Some(record) => Ok(record),
            None => {
                debug!("No record for tenant {}, returning empty record", session.tenant_id);
                Ok(TenantRecord::empty(session.tenant_id.clone()))
            }
        }
    }

    /// Upserts the tenant's display name.
    pub async fn put(
        &self,
        session: &TenantSession,
        name: Option<String>,
    ) -> Result<TenantRecord, DomainError> {
        let record = TenantRecord::new(session.tenant_id.clone(), name);
        self.repo.save(session, &record).await?;

        info!("Saved record for tenant {}", record.id);
        Ok(record)
    }
}
