//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    #[error("Token does not carry claim {0}")]
    MissingTenantClaim(String),

    #[error("Credential vending failed: {0}")]
    CredentialVending(String),

    #[error("Template download failed: {0}")]
    TemplateDownload(String),

    #[error("Template extraction failed: {0}")]
    TemplateExtraction(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
