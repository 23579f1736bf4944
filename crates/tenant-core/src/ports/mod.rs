//! Ports for the external collaborators the request flow depends on

pub mod credential_resolver;
pub mod template_cache;

pub use credential_resolver::CredentialResolver;
pub use template_cache::{TemplateCache, TemplateLoad};
