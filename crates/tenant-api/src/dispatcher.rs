// ============================================================================
// Tenant API - Request Dispatcher
// File: crates/tenant-api/src/dispatcher.rs
// ============================================================================
//! Maps the request method onto the read or write path
//!
//! `GET` reads the caller's tenant record, `POST` upserts its name, anything
//! else is answered with 405 before any other work. Both paths make sure the
//! policy template bundle is on disk first; the credential resolver renders
//! the tenant's session policy from it.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use tenant_core::ports::{CredentialResolver, TemplateCache, TemplateLoad};
use tenant_core::repositories::TenantRecordStore;
use tenant_core::services::TenantService;
use tenant_core::DomainError;

use crate::error::ApiError;
use crate::request::GatewayRequest;
use crate::response::GatewayResponse;

pub struct Dispatcher {
    templates: Arc<dyn TemplateCache>,
    resolver: Arc<dyn CredentialResolver>,
    tenants: TenantService<dyn TenantRecordStore>,
    role: String,
}

impl Dispatcher {
    pub fn new(
        templates: Arc<dyn TemplateCache>,
        resolver: Arc<dyn CredentialResolver>,
        store: Arc<dyn TenantRecordStore>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            templates,
            resolver,
            tenants: TenantService::new(store),
            role: role.into(),
        }
    }

    #[instrument(skip_all, fields(request_id = %request.request_id, method = %request.method))]
    pub async fn handle(&self, request: GatewayRequest) -> GatewayResponse {
        let result = match request.method.as_str().to_ascii_lowercase().as_str() {
            "get" => self.handle_get(&request).await,
            "post" => self.handle_post(&request).await,
            _ => {
                debug!("Method not allowed");
                return GatewayResponse::method_not_allowed();
            }
        };

        result.unwrap_or_else(|e| e.into_gateway_response(&request.request_id))
    }

    async fn handle_post(&self, request: &GatewayRequest) -> Result<GatewayResponse, ApiError> {
        self.load_templates().await?;

        // Only `name` is persisted; other keys are accepted and ignored.
        let mut body = parse_body(request.body.as_deref())?;

        let session = self.resolver.resolve(&request.headers, &self.role).await?;
        let name = body.remove("name").flatten();

        self.tenants.put(&session, name).await?;

        Ok(GatewayResponse::created())
    }

    async fn handle_get(&self, request: &GatewayRequest) -> Result<GatewayResponse, ApiError> {
        self.load_templates().await?;

        let session = self.resolver.resolve(&request.headers, &self.role).await?;
        let record = self.tenants.get(&session).await?;

        let body = record
            .to_json()
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        Ok(GatewayResponse::ok_json(body))
    }

    async fn load_templates(&self) -> Result<(), ApiError> {
        if self.templates.ensure_ready().await? == TemplateLoad::Downloaded {
            info!("Template bundle loaded for this environment");
        }
        Ok(())
    }
}

/// Parses a flat JSON object of string (or null) values.
fn parse_body(body: Option<&str>) -> Result<HashMap<String, Option<String>>, DomainError> {
    let body = body.ok_or_else(|| DomainError::InvalidBody("missing body".to_string()))?;
    serde_json::from_str(body).map_err(|e| DomainError::InvalidBody(e.to_string()))
}
