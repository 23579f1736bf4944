//! Shared AWS SDK configuration

use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::Credentials;
use tenant_core::ScopedCredentials;

/// Loads region and base credentials from the execution environment.
pub async fn load_sdk_config() -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest()).load().await
}

pub(crate) fn to_sdk_credentials(scoped: &ScopedCredentials) -> Credentials {
    Credentials::new(
        scoped.access_key_id.clone(),
        scoped.secret_access_key.clone(),
        scoped.session_token.clone(),
        scoped.expires_at.map(std::time::SystemTime::from),
        "tenant-session",
    )
}
