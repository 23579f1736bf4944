// ============================================================================
// Tenant API - Local HTTP Adapter
// File: crates/tenant-api/src/handlers/local.rs
// ============================================================================
//! Serves the dispatcher over plain HTTP for local runs
//!
//! Every method on `/` is forwarded so the dispatcher answers 405 itself.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::dispatcher::Dispatcher;
use crate::request::GatewayRequest;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Dispatch handler - ANY /
pub async fn dispatch(
    State(dispatcher): State<Arc<Dispatcher>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let request = GatewayRequest::new(method, request_id)
        .with_headers(headers)
        .with_body_bytes(body.to_vec());

    dispatcher.handle(request).await.into_response()
}

pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/", any(dispatch))
        .with_state(dispatcher)
        .layer(TraceLayer::new_for_http())
}
