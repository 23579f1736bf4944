use axum::http::StatusCode;
use thiserror::Error;

use tenant_core::DomainError;

use crate::response::{GatewayError, GatewayResponse};

/// HTTP-facing error. Carries the public message only; internal detail is
/// logged when the domain error is converted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    InternalServerError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "Bad Request",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::InternalServerError(_) => "InternalServerError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn into_gateway_response(self, request_id: &str) -> GatewayResponse {
        let status = self.status();
        let payload = GatewayError {
            error_type: self.error_type().to_string(),
            status_code: status.as_u16().to_string(),
            request_id: request_id.to_string(),
            message: self.message().to_string(),
        };
        GatewayResponse::error(status, &payload)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidBody(detail) => {
                tracing::warn!("Error parsing JSON body: {}", detail);
                ApiError::BadRequest("Error parsing JSON body.".to_string())
            }
            DomainError::MissingToken => {
                tracing::warn!("Request without bearer token");
                ApiError::Unauthorized("Missing bearer token.".to_string())
            }
            DomainError::InvalidToken(detail) => {
                tracing::warn!("Invalid bearer token: {}", detail);
                ApiError::Unauthorized("Invalid bearer token.".to_string())
            }
            DomainError::MissingTenantClaim(claim) => {
                tracing::warn!("Bearer token has no {} claim", claim);
                ApiError::Unauthorized("Token does not carry a tenant.".to_string())
            }
            DomainError::TemplateDownload(detail) => {
                tracing::error!("Template download failed: {}", detail);
                ApiError::InternalServerError("Error downloading template file.".to_string())
            }
            DomainError::TemplateExtraction(detail) => {
                tracing::error!("Template extraction failed: {}", detail);
                ApiError::InternalServerError("Error unzipping file.".to_string())
            }
            DomainError::CredentialVending(detail) => {
                tracing::error!("Credential vending failed: {}", detail);
                ApiError::InternalServerError("Error vending tenant credentials.".to_string())
            }
            DomainError::DatabaseError(detail) => {
                tracing::error!("Database error: {}", detail);
                ApiError::InternalServerError("Error accessing tenant data.".to_string())
            }
            DomainError::Serialization(detail) => {
                tracing::error!("Serialization error: {}", detail);
                ApiError::InternalServerError("Error encoding JSON response.".to_string())
            }
            DomainError::InternalError(detail) => {
                tracing::error!("Internal error: {}", detail);
                ApiError::InternalServerError("Internal server error.".to_string())
            }
        }
    }
}
