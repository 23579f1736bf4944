//! Template bundle download from S3

use std::path::Path;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client;
use tracing::info;

use tenant_core::error::DomainError;

use crate::templates::TemplateSource;

/// Fetches one object with the function's own credentials.
pub struct S3TemplateSource {
    client: Client,
    bucket: String,
    key: String,
}

impl S3TemplateSource {
    pub fn new(sdk_config: &SdkConfig, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client: Client::new(sdk_config),
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

#[async_trait]
impl TemplateSource for S3TemplateSource {
    async fn fetch_to(&self, dest: &Path) -> Result<u64, DomainError> {
        info!("Downloading s3://{}/{} to {}", self.bucket, self.key, dest.display());

        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .send()
            .await
            .map_err(|e| DomainError::TemplateDownload(DisplayErrorContext(&e).to_string()))?;

        let bytes = object
            .body
            .collect()
            .await
            .map_err(|e| DomainError::TemplateDownload(e.to_string()))?
            .into_bytes();

        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|e| DomainError::TemplateDownload(format!("{}: {}", dest.display(), e)))?;

        Ok(bytes.len() as u64)
    }
}
