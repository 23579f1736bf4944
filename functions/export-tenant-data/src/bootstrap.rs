// ============================================================================
// Export Tenant Data - Bootstrap
// File: functions/export-tenant-data/src/bootstrap.rs
// ============================================================================
//! Assembles the dispatcher from configuration and the AWS environment

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use tenant_api::Dispatcher;
use tenant_infrastructure::aws::load_sdk_config;
use tenant_infrastructure::{
    ArchiveTemplateCache, DynamoTenantRecordStore, S3TemplateSource, StsCredentialVendor,
    TokenVendingMachine,
};
use tenant_security::TenantTokenDecoder;
use tenant_shared::config::{AuthSettings, TokenMode};
use tenant_shared::constants::POLICY_DIR_NAME;
use tenant_shared::AppConfig;

pub async fn build_dispatcher(config: &AppConfig) -> anyhow::Result<Dispatcher> {
    let sdk_config = load_sdk_config().await;

    let templates = ArchiveTemplateCache::new(
        S3TemplateSource::new(&sdk_config, &config.template_bucket, &config.template_key),
        &config.work_dir,
    );

    let resolver = TokenVendingMachine::new(
        StsCredentialVendor::new(&sdk_config),
        token_decoder(&config.auth)?,
        Path::new(&config.work_dir).join(POLICY_DIR_NAME),
    )
    .with_policy_var("table", &config.db_table)
    .with_policy_var("bucket", &config.template_bucket);

    let store = DynamoTenantRecordStore::new(sdk_config, &config.db_table);

    info!(
        table = %config.db_table,
        bucket = %config.template_bucket,
        "Dispatcher ready"
    );

    Ok(Dispatcher::new(
        Arc::new(templates),
        Arc::new(resolver),
        Arc::new(store),
        &config.role,
    ))
}

pub fn token_decoder(auth: &AuthSettings) -> anyhow::Result<TenantTokenDecoder> {
    match auth.mode {
        TokenMode::Verified => {
            if let Some(pem) = &auth.jwt_public_key_pem {
                TenantTokenDecoder::with_rsa_pem(pem, &auth.tenant_claim)
                    .context("invalid AUTH__JWT_PUBLIC_KEY_PEM")
            } else if let Some(secret) = &auth.jwt_secret {
                Ok(TenantTokenDecoder::with_secret(secret, &auth.tenant_claim))
            } else {
                anyhow::bail!("verified token mode needs AUTH__JWT_SECRET or AUTH__JWT_PUBLIC_KEY_PEM")
            }
        }
        TokenMode::Unverified => {
            warn!("Bearer token signatures are NOT verified (AUTH__MODE=unverified)");
            Ok(TenantTokenDecoder::unverified(&auth.tenant_claim))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(mode: TokenMode, secret: Option<&str>, pem: Option<&str>) -> AuthSettings {
        AuthSettings {
            mode,
            tenant_claim: "custom:tenant_id".to_string(),
            jwt_secret: secret.map(str::to_string),
            jwt_public_key_pem: pem.map(str::to_string),
        }
    }

    #[test]
    fn test_token_decoder_by_mode() {
        assert!(token_decoder(&auth(TokenMode::Verified, Some("s3cr3t"), None)).is_ok());
        assert!(token_decoder(&auth(TokenMode::Unverified, None, None)).is_ok());
        assert!(token_decoder(&auth(TokenMode::Verified, None, None)).is_err());
        assert!(token_decoder(&auth(TokenMode::Verified, None, Some("not a pem"))).is_err());
    }

    #[test]
    fn test_decoder_uses_configured_claim() {
        let mut settings = auth(TokenMode::Unverified, None, None);
        settings.tenant_claim = "tid".to_string();
        let decoder = token_decoder(&settings).unwrap();
        assert_eq!(decoder.tenant_claim(), "tid");
    }
}
