//! Credential resolver port

use async_trait::async_trait;
use http::HeaderMap;

use crate::domain::TenantSession;
use crate::error::DomainError;

/// Derives the caller's tenant and a credential scoped to it from the request
/// headers, by assuming `role`.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap, role: &str) -> Result<TenantSession, DomainError>;
}
