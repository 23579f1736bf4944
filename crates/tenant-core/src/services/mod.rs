//! Domain services (business logic)

pub mod tenant_service;

pub use tenant_service::TenantService;
