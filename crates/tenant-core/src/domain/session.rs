//! Tenant session: who is calling, and the credentials vended for them

use chrono::{DateTime, Utc};

/// Temporary credentials scoped to one tenant.
#[derive(Clone, PartialEq, Eq)]
pub struct ScopedCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for ScopedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Resolved caller identity. Handed to every store call so that storage
/// access always runs under the caller's own credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantSession {
    pub tenant_id: String,
    pub credentials: ScopedCredentials,
}

impl TenantSession {
    pub fn new(tenant_id: impl Into<String>, credentials: ScopedCredentials) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            credentials,
        }
    }
}
