//! # Export Tenant Data
//!
//! Wiring for the tenant data function: builds the dispatcher from
//! configuration and adapts API Gateway proxy events to it.

pub mod bootstrap;
pub mod gateway;

pub use bootstrap::build_dispatcher;
pub use gateway::{from_proxy_request, into_proxy_response};
