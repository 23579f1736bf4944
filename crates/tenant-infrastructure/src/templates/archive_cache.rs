// ============================================================================
// Tenant Infrastructure - Template Archive Cache
// File: crates/tenant-infrastructure/src/templates/archive_cache.rs
// ============================================================================
//! Download-once, extract-once cache of the template bundle on local disk
//!
//! The presence of the archive file marks the execution environment as warm.
//! The archive only lands at its final path after a complete download, and is
//! removed again if extraction fails, so a broken bundle is retried on the
//! next request instead of being trusted forever.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use tenant_core::error::DomainError;
use tenant_core::ports::{TemplateCache, TemplateLoad};
use tenant_shared::constants::{POLICY_DIR_NAME, TEMPLATE_ARCHIVE_NAME};

use super::TemplateSource;

pub struct ArchiveTemplateCache<S: TemplateSource> {
    source: S,
    archive_path: PathBuf,
    extract_dir: PathBuf,
    // The local server may run requests concurrently.
    guard: Mutex<()>,
}

impl<S: TemplateSource> ArchiveTemplateCache<S> {
    pub fn new(source: S, work_dir: impl AsRef<Path>) -> Self {
        let work_dir = work_dir.as_ref();
        Self {
            source,
            archive_path: work_dir.join(TEMPLATE_ARCHIVE_NAME),
            extract_dir: work_dir.join(POLICY_DIR_NAME),
            guard: Mutex::new(()),
        }
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Directory the bundle is extracted into.
    pub fn extract_dir(&self) -> &Path {
        &self.extract_dir
    }

    async fn download(&self) -> Result<(), DomainError> {
        let partial = self.archive_path.with_extension("zip.part");

        match self.source.fetch_to(&partial).await {
            Ok(bytes) => {
                info!("Downloaded template archive ({} bytes)", bytes);
            }
            Err(e) => {
                error!("Could not download template file: {}", e);
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            }
        }

        tokio::fs::rename(&partial, &self.archive_path)
            .await
            .map_err(|e| DomainError::TemplateDownload(format!("rename failed: {}", e)))
    }

    async fn extract(&self) -> Result<(), DomainError> {
        let archive = self.archive_path.clone();
        let target = self.extract_dir.clone();

        let result = tokio::task::spawn_blocking(move || extract_archive(&archive, &target))
            .await
            .map_err(|e| DomainError::InternalError(format!("extraction task failed: {}", e)))?;

        if let Err(e) = result {
            error!("Could not unzip template file: {}", e);
            if let Err(remove_err) = tokio::fs::remove_file(&self.archive_path).await {
                warn!("Could not remove broken archive: {}", remove_err);
            }
            return Err(e);
        }

        Ok(())
    }
}

fn extract_archive(archive: &Path, target: &Path) -> Result<(), DomainError> {
    let file = std::fs::File::open(archive)
        .map_err(|e| DomainError::TemplateExtraction(format!("{}: {}", archive.display(), e)))?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| DomainError::TemplateExtraction(e.to_string()))?;
    std::fs::create_dir_all(target)
        .map_err(|e| DomainError::TemplateExtraction(format!("{}: {}", target.display(), e)))?;
    zip.extract(target)
        .map_err(|e| DomainError::TemplateExtraction(e.to_string()))
}

#[async_trait]
impl<S: TemplateSource> TemplateCache for ArchiveTemplateCache<S> {
    async fn ensure_ready(&self) -> Result<TemplateLoad, DomainError> {
        let _guard = self.guard.lock().await;

        if tokio::fs::try_exists(&self.archive_path).await.unwrap_or(false) {
            return Ok(TemplateLoad::Cached);
        }

        info!("Templates zip file not found, downloading...");
        self.download().await?;
        self.extract().await?;

        info!("Templates extracted to {}", self.extract_dir.display());
        Ok(TemplateLoad::Downloaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::MockTemplateSource;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn policy_bundle() -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("dynamodb.json", options).unwrap();
        writer
            .write_all(br#"{"Statement":[{"Effect":"Allow","Action":"dynamodb:GetItem","Resource":"*"}]}"#)
            .unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn source_writing(bytes: Vec<u8>, times: usize) -> MockTemplateSource {
        let mut source = MockTemplateSource::new();
        source.expect_fetch_to().times(times).returning(move |dest| {
            std::fs::write(dest, &bytes).unwrap();
            Ok(bytes.len() as u64)
        });
        source
    }

    #[tokio::test]
    async fn test_downloads_once_per_environment() {
        let work_dir = tempfile::tempdir().unwrap();
        let cache = ArchiveTemplateCache::new(source_writing(policy_bundle(), 1), work_dir.path());

        assert_eq!(cache.ensure_ready().await.unwrap(), TemplateLoad::Downloaded);
        assert_eq!(cache.ensure_ready().await.unwrap(), TemplateLoad::Cached);

        assert!(cache.archive_path().exists());
        assert!(cache.extract_dir().join("dynamodb.json").exists());
    }

    #[tokio::test]
    async fn test_warm_environment_does_no_io() {
        let work_dir = tempfile::tempdir().unwrap();
        std::fs::write(work_dir.path().join(TEMPLATE_ARCHIVE_NAME), policy_bundle()).unwrap();

        let mut source = MockTemplateSource::new();
        source.expect_fetch_to().never();
        let cache = ArchiveTemplateCache::new(source, work_dir.path());

        assert_eq!(cache.ensure_ready().await.unwrap(), TemplateLoad::Cached);
    }

    #[tokio::test]
    async fn test_corrupt_archive_fails_and_is_retried() {
        let work_dir = tempfile::tempdir().unwrap();
        let cache = ArchiveTemplateCache::new(
            source_writing(b"this is not a zip".to_vec(), 2),
            work_dir.path(),
        );

        let err = cache.ensure_ready().await.unwrap_err();
        assert!(matches!(err, DomainError::TemplateExtraction(_)));
        assert!(!cache.archive_path().exists());

        // Not marked warm: the next request downloads again.
        assert!(cache.ensure_ready().await.is_err());
    }

    #[tokio::test]
    async fn test_download_failure_leaves_nothing_behind() {
        let work_dir = tempfile::tempdir().unwrap();
        let mut source = MockTemplateSource::new();
        source.expect_fetch_to().times(1).returning(|dest| {
            std::fs::write(dest, b"partial").unwrap();
            Err(DomainError::TemplateDownload("connection reset".to_string()))
        });
        let cache = ArchiveTemplateCache::new(source, work_dir.path());

        let err = cache.ensure_ready().await.unwrap_err();
        assert!(matches!(err, DomainError::TemplateDownload(_)));
        assert!(!cache.archive_path().exists());
        assert!(!cache.archive_path().with_extension("zip.part").exists());
    }
}
