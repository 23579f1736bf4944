// ============================================================================
// Tenant Core - Tenant Record Entity
// File: crates/tenant-core/src/domain/tenant_record.rs
// ============================================================================

use serde::{Deserialize, Serialize};

/// The single record kept per tenant. `id` is the partition key; `name` is
/// only ever changed by the write path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRecord {
    pub id: String,
    pub name: Option<String>,
}

impl TenantRecord {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self { id: id.into(), name }
    }

    /// Shape returned for a tenant that has never been written.
    pub fn empty(id: impl Into<String>) -> Self {
        Self { id: id.into(), name: None }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_with_name() {
        let record = TenantRecord::new("t-123", Some("Acme".to_string()));
        assert_eq!(record.to_json().unwrap(), r#"{"id":"t-123","name":"Acme"}"#);
    }

    #[test]
    fn test_empty_record_serializes_null_name() {
        let record = TenantRecord::empty("t-404");
        assert_eq!(record.to_json().unwrap(), r#"{"id":"t-404","name":null}"#);
    }
}
