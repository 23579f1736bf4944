//! # Tenant Security
//!
//! Bearer token handling, tenant claim decoding, and tenant-scoped session
//! policies.

pub mod bearer;
pub mod jwt;
pub mod policy;

pub use bearer::bearer_token;
pub use jwt::{JwtError, TenantTokenDecoder};
pub use policy::{PolicyError, PolicyTemplates};
