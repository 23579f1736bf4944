//! STS AssumeRole adapter

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client;
use chrono::DateTime;
use tracing::error;

use tenant_core::error::DomainError;
use tenant_core::ScopedCredentials;

use super::token_vending::CredentialVendor;

pub struct StsCredentialVendor {
    client: Client,
}

impl StsCredentialVendor {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl CredentialVendor for StsCredentialVendor {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
        policy: Option<String>,
    ) -> Result<ScopedCredentials, DomainError> {
        let response = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .set_policy(policy)
            .send()
            .await
            .map_err(|e| {
                error!("AssumeRole on {} failed: {}", role_arn, DisplayErrorContext(&e));
                DomainError::CredentialVending(DisplayErrorContext(&e).to_string())
            })?;

        let credentials = response
            .credentials()
            .ok_or_else(|| DomainError::CredentialVending("AssumeRole returned no credentials".into()))?;

        Ok(ScopedCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: Some(credentials.session_token().to_string()),
            expires_at: DateTime::from_timestamp(credentials.expiration().secs(), 0),
        })
    }
}
