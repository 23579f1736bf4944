//! Configuration management
//!
//! The function is configured through the environment. `ROLE`,
//! `TEMPLATE_BUCKET`, `TEMPLATE_KEY` and `DB_TABLE` are required; nested
//! settings use `__` as separator (`AUTH__MODE=unverified`).

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_LOCAL_HOST, DEFAULT_LOCAL_PORT, DEFAULT_TENANT_CLAIM, DEFAULT_WORK_DIR};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Role assumed when vending tenant credentials.
    pub role: String,
    pub template_bucket: String,
    pub template_key: String,
    pub db_table: String,
    /// Ephemeral directory holding the template archive and its extraction.
    pub work_dir: String,
    pub auth: AuthSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenMode {
    Verified,
    Unverified,
}

#[derive(Deserialize, Clone)]
pub struct AuthSettings {
    pub mode: TokenMode,
    pub tenant_claim: String,
    pub jwt_secret: Option<String>,
    pub jwt_public_key_pem: Option<String>,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("mode", &self.mode)
            .field("tenant_claim", &self.tenant_claim)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "***"))
            .field("jwt_public_key_pem", &self.jwt_public_key_pem.is_some())
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::build(Environment::default())
    }

    /// Builds the configuration from an explicit variable map instead of the
    /// process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::build(Environment::default().source(Some(source)))
    }

    fn build(environment: Environment) -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "production".into());
        let config = Config::builder()
            .set_default("work_dir", DEFAULT_WORK_DIR)?
            .set_default("auth.mode", "verified")?
            .set_default("auth.tenant_claim", DEFAULT_TENANT_CLAIM)?
            .set_default("server.host", DEFAULT_LOCAL_HOST)?
            .set_default("server.port", i64::from(DEFAULT_LOCAL_PORT))?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(environment.separator("__").try_parsing(true))
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    fn validate(&self) -> Result<(), AppError> {
        for (key, value) in [
            ("ROLE", &self.role),
            ("TEMPLATE_BUCKET", &self.template_bucket),
            ("TEMPLATE_KEY", &self.template_key),
            ("DB_TABLE", &self.db_table),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidConfig(format!("{} must not be empty", key)));
            }
        }

        if self.auth.mode == TokenMode::Verified
            && self.auth.jwt_secret.is_none()
            && self.auth.jwt_public_key_pem.is_none()
        {
            return Err(AppError::InvalidConfig(
                "verified token mode needs AUTH__JWT_SECRET or AUTH__JWT_PUBLIC_KEY_PEM".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("ROLE", "arn:aws:iam::123456789012:role/tenant-export"),
            ("TEMPLATE_BUCKET", "policy-templates"),
            ("TEMPLATE_KEY", "templates/policies.zip"),
            ("DB_TABLE", "TenantInfo"),
            ("AUTH__JWT_SECRET", "local-secret"),
        ]
    }

    #[test]
    fn test_load_required_and_defaults() {
        let cfg = AppConfig::from_vars(base_vars()).unwrap();
        assert_eq!(cfg.role, "arn:aws:iam::123456789012:role/tenant-export");
        assert_eq!(cfg.template_bucket, "policy-templates");
        assert_eq!(cfg.template_key, "templates/policies.zip");
        assert_eq!(cfg.db_table, "TenantInfo");
        assert_eq!(cfg.work_dir, DEFAULT_WORK_DIR);
        assert_eq!(cfg.auth.mode, TokenMode::Verified);
        assert_eq!(cfg.auth.tenant_claim, DEFAULT_TENANT_CLAIM);
        assert_eq!(cfg.server.port, DEFAULT_LOCAL_PORT);
    }

    #[test]
    fn test_missing_required_key_fails() {
        let vars: Vec<_> = base_vars().into_iter().filter(|(k, _)| *k != "DB_TABLE").collect();
        assert!(AppConfig::from_vars(vars).is_err());
    }

    #[test]
    fn test_verified_mode_requires_key_material() {
        let vars: Vec<_> = base_vars()
            .into_iter()
            .filter(|(k, _)| *k != "AUTH__JWT_SECRET")
            .collect();
        let err = AppConfig::from_vars(vars).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn test_unverified_mode_without_key() {
        let mut vars: Vec<_> = base_vars()
            .into_iter()
            .filter(|(k, _)| *k != "AUTH__JWT_SECRET")
            .collect();
        vars.push(("AUTH__MODE", "unverified"));
        let cfg = AppConfig::from_vars(vars).unwrap();
        assert_eq!(cfg.auth.mode, TokenMode::Unverified);
    }

    #[test]
    fn test_debug_hides_secret() {
        let cfg = AppConfig::from_vars(base_vars()).unwrap();
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("local-secret"));
    }
}
