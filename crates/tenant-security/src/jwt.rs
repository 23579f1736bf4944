//! JWT tenant claim decoding

use std::collections::HashMap;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid key material: {0}")]
    KeyError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Claim {0} missing or empty")]
    MissingClaim(String),
}

enum Verification {
    Signed {
        key: DecodingKey,
        validation: Validation,
    },
    /// Claims are read straight from the payload segment. No verifier is
    /// built, so the header `alg` is irrelevant.
    Unverified,
}

/// Reads the tenant identifier out of a bearer JWT.
///
/// A verifying decoder checks the signature (HS256 secret or RS256 public
/// key) and expiry. [`TenantTokenDecoder::unverified`] only base64-decodes
/// the claims.
pub struct TenantTokenDecoder {
    verification: Verification,
    tenant_claim: String,
}

impl TenantTokenDecoder {
    pub fn with_secret(secret: &str, tenant_claim: impl Into<String>) -> Self {
        Self {
            verification: Verification::Signed {
                key: DecodingKey::from_secret(secret.as_bytes()),
                validation: Self::verifying(Algorithm::HS256),
            },
            tenant_claim: tenant_claim.into(),
        }
    }

    pub fn with_rsa_pem(pem: &str, tenant_claim: impl Into<String>) -> Result<Self, JwtError> {
        let key = DecodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| JwtError::KeyError(e.to_string()))?;
        Ok(Self {
            verification: Verification::Signed {
                key,
                validation: Self::verifying(Algorithm::RS256),
            },
            tenant_claim: tenant_claim.into(),
        })
    }

    pub fn unverified(tenant_claim: impl Into<String>) -> Self {
        Self {
            verification: Verification::Unverified,
            tenant_claim: tenant_claim.into(),
        }
    }

    fn verifying(algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        // Identity-provider tokens carry provider-specific audiences.
        validation.validate_aud = false;
        validation
    }

    pub fn tenant_claim(&self) -> &str {
        &self.tenant_claim
    }

    pub fn tenant(&self, token: &str) -> Result<String, JwtError> {
        let claims = match &self.verification {
            Verification::Signed { key, validation } => {
                decode::<HashMap<String, Value>>(token, key, validation)
                    .map(|data| data.claims)
                    .map_err(|e| match e.kind() {
                        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                        _ => JwtError::ValidationError(e.to_string()),
                    })?
            }
            Verification::Unverified => unverified_claims(token)?,
        };

        match claims.get(&self.tenant_claim) {
            Some(Value::String(tenant)) if !tenant.trim().is_empty() => Ok(tenant.trim().to_string()),
            Some(Value::Number(tenant)) => Ok(tenant.to_string()),
            _ => Err(JwtError::MissingClaim(self.tenant_claim.clone())),
        }
    }
}

fn unverified_claims(token: &str) -> Result<HashMap<String, Value>, JwtError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(JwtError::ValidationError("expected three token segments".to_string()));
    };

    let _: HashMap<String, Value> = decode_segment(header)?;
    decode_segment(payload)
}

fn decode_segment(segment: &str) -> Result<HashMap<String, Value>, JwtError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| JwtError::ValidationError(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| JwtError::ValidationError(e.to_string()))
}
