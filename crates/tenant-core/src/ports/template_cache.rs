//! Template cache port

use async_trait::async_trait;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateLoad {
    /// Already present in this execution environment; no I/O was done.
    Cached,
    /// Fetched and extracted by this call.
    Downloaded,
}

/// Keeps the policy template bundle available on local disk. Implementations
/// download and extract at most once per execution environment.
#[async_trait]
pub trait TemplateCache: Send + Sync {
    async fn ensure_ready(&self) -> Result<TemplateLoad, DomainError>;
}
