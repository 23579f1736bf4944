//! API Gateway proxy event conversion

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::warn;

use tenant_api::{GatewayRequest, GatewayResponse};

/// Builds a gateway request from a proxy event. Base64 bodies are decoded.
/// A body that does not decode, or is not UTF-8 once decoded, is dropped and
/// surfaces as a parse error on the write path.
pub fn from_proxy_request(event: ApiGatewayProxyRequest, request_id: &str) -> GatewayRequest {
    let body = match event.body {
        Some(body) if event.is_base64_encoded => match STANDARD.decode(body.as_bytes()) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Could not decode base64 body: {}", e);
                Vec::new()
            }
        },
        Some(body) => body.into_bytes(),
        None => Vec::new(),
    };

    GatewayRequest::new(event.http_method, request_id)
        .with_headers(event.headers)
        .with_body_bytes(body)
}

pub fn into_proxy_response(response: GatewayResponse) -> ApiGatewayProxyResponse {
    let mut proxy = ApiGatewayProxyResponse::default();
    proxy.status_code = i64::from(response.status.as_u16());
    proxy.headers = response.headers;
    proxy.body = response.body.map(Body::Text);
    proxy.is_base64_encoded = false;
    proxy
}
