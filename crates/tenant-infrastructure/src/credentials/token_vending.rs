// ============================================================================
// Tenant Infrastructure - Token Vending Machine
// File: crates/tenant-infrastructure/src/credentials/token_vending.rs
// ============================================================================
//! Turns a caller's bearer token into tenant-scoped temporary credentials
//!
//! 1. Read the tenant claim out of the bearer JWT.
//! 2. Render the session policy from the extracted templates for that tenant.
//! 3. Assume the configured role with the policy attached.

use std::path::PathBuf;

use async_trait::async_trait;
use http::HeaderMap;
use tracing::{info, warn};

use tenant_core::error::DomainError;
use tenant_core::ports::CredentialResolver;
use tenant_core::{ScopedCredentials, TenantSession};
use tenant_security::{bearer_token, JwtError, PolicyTemplates, TenantTokenDecoder};

const MAX_SESSION_NAME_LEN: usize = 64;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVendor: Send + Sync {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
        policy: Option<String>,
    ) -> Result<ScopedCredentials, DomainError>;
}

pub struct TokenVendingMachine<V: CredentialVendor> {
    vendor: V,
    decoder: TenantTokenDecoder,
    policy_dir: PathBuf,
    policy_vars: Vec<(String, String)>,
}

impl<V: CredentialVendor> TokenVendingMachine<V> {
    pub fn new(vendor: V, decoder: TenantTokenDecoder, policy_dir: impl Into<PathBuf>) -> Self {
        Self {
            vendor,
            decoder,
            policy_dir: policy_dir.into(),
            policy_vars: Vec::new(),
        }
    }

    /// Adds a `{{key}}` substitution applied to every policy template.
    pub fn with_policy_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.policy_vars.push((key.into(), value.into()));
        self
    }

    pub fn tenant(&self, headers: &HeaderMap) -> Result<String, DomainError> {
        let token = bearer_token(headers).ok_or(DomainError::MissingToken)?;

        self.decoder.tenant(token).map_err(|e| match e {
            JwtError::MissingClaim(claim) => DomainError::MissingTenantClaim(claim),
            other => {
                warn!("Rejected bearer token: {}", other);
                DomainError::InvalidToken(other.to_string())
            }
        })
    }

    pub fn session_policy(&self, tenant: &str) -> Result<Option<String>, DomainError> {
        let templates = PolicyTemplates::load(&self.policy_dir)
            .map_err(|e| DomainError::CredentialVending(e.to_string()))?;

        let mut vars: Vec<(&str, &str)> = self
            .policy_vars
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        vars.push(("tenant", tenant));

        templates
            .render(&vars)
            .map_err(|e| DomainError::CredentialVending(e.to_string()))
    }
}

/// Role session names allow `[\w+=,.@-]` and at most 64 characters.
pub(crate) fn session_name(tenant: &str) -> String {
    let cleaned: String = tenant
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || "_+=,.@-".contains(*c))
        .collect();

    if cleaned.is_empty() {
        return "tenant-session".to_string();
    }

    let mut name = format!("tenant-{}", cleaned);
    name.truncate(MAX_SESSION_NAME_LEN);
    name
}

#[async_trait]
impl<V: CredentialVendor> CredentialResolver for TokenVendingMachine<V> {
    async fn resolve(&self, headers: &HeaderMap, role: &str) -> Result<TenantSession, DomainError> {
        let tenant = self.tenant(headers)?;
        let policy = self.session_policy(&tenant)?;

        if policy.is_none() {
            warn!("No policy templates found, vending credentials without a session policy");
        }

        let credentials = self
            .vendor
            .assume_role(role, &session_name(&tenant), policy)
            .await?;

        info!("TENANT ID: {}", tenant);
        Ok(TenantSession::new(tenant, credentials))
    }
}
