//! Gateway response and error payload

use axum::http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use tenant_shared::constants::CONTENT_TYPE_JSON;

#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayError {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(rename = "statusCode")]
    pub status_code: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub message: String,
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
    headers
}

impl GatewayResponse {
    pub fn ok_json(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            headers: json_headers(),
            body: Some(body),
        }
    }

    pub fn created() -> Self {
        Self {
            status: StatusCode::CREATED,
            headers: json_headers(),
            body: None,
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn error(status: StatusCode, error: &GatewayError) -> Self {
        // A struct of four strings always serializes.
        let body = serde_json::to_string(error).unwrap_or_default();
        Self {
            status,
            headers: json_headers(),
            body: Some(body),
        }
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, self.body.unwrap_or_default()).into_response()
    }
}
