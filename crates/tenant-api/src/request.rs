//! Inbound request shape

use axum::http::{HeaderMap, Method};
use tracing::warn;

/// A request as delivered by the gateway, independent of the transport.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
    /// Correlation id of the invocation, echoed in error payloads.
    pub request_id: String,
}

impl GatewayRequest {
    pub fn new(method: Method, request_id: impl Into<String>) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
            request_id: request_id.into(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attaches a raw transport body. Empty bodies are treated as absent, and
    /// so are bodies that are not valid UTF-8, which the write path then
    /// rejects as unparsable.
    pub fn with_body_bytes(self, bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            return self;
        }
        match String::from_utf8(bytes) {
            Ok(body) => self.with_body(body),
            Err(e) => {
                warn!("Dropping request body that is not valid UTF-8: {}", e);
                self
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_bytes() {
        let request = GatewayRequest::new(Method::POST, "req-1").with_body_bytes(br#"{"name":"Acme"}"#.to_vec());
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Acme"}"#));

        let request = GatewayRequest::new(Method::POST, "req-1").with_body_bytes(Vec::new());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_invalid_utf8_body_is_dropped() {
        let request =
            GatewayRequest::new(Method::POST, "req-1").with_body_bytes(b"{\"name\":\"Ac\xFFme\"}".to_vec());
        assert!(request.body.is_none());
    }
}
