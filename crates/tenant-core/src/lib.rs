//! # Tenant Core
//!
//! Domain entities, ports, and services for the tenant export function.

pub mod domain;
pub mod error;
pub mod ports;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
