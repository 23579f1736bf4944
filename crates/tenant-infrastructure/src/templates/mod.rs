//! Policy template bundle cache

pub mod archive_cache;

use std::path::Path;

use async_trait::async_trait;
use tenant_core::error::DomainError;

pub use archive_cache::ArchiveTemplateCache;

/// Where the template archive comes from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Writes the archive to `dest` and returns the number of bytes written.
    async fn fetch_to(&self, dest: &Path) -> Result<u64, DomainError>;
}
