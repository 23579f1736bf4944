// ============================================================================
// Tenant Infrastructure - DynamoDB Tenant Record Repository
// File: crates/tenant-infrastructure/src/database/dynamodb/tenant_record_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::{debug, error, info};

use tenant_core::error::DomainError;
use tenant_core::repositories::TenantRecordStore;
use tenant_core::{TenantRecord, TenantSession};
use tenant_shared::constants::{TENANT_ID_ATTRIBUTE, TENANT_NAME_ATTRIBUTE};

/// Tenant records in a DynamoDB table keyed by `tenant-id`.
///
/// Holds only the shared SDK configuration; a client carrying the session's
/// credentials is built for each call.
pub struct DynamoTenantRecordStore {
    sdk_config: SdkConfig,
    table_name: String,
}

impl std::fmt::Debug for DynamoTenantRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoTenantRecordStore")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl DynamoTenantRecordStore {
    pub fn new(sdk_config: SdkConfig, table_name: impl Into<String>) -> Self {
        Self {
            sdk_config,
            table_name: table_name.into(),
        }
    }

    fn client_for(&self, session: &TenantSession) -> Client {
        let config = aws_sdk_dynamodb::config::Builder::from(&self.sdk_config)
            .credentials_provider(crate::aws::to_sdk_credentials(&session.credentials))
            .build();
        Client::from_conf(config)
    }
}

pub(crate) fn record_to_item(record: &TenantRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::with_capacity(2);
    item.insert(
        TENANT_ID_ATTRIBUTE.to_string(),
        AttributeValue::S(record.id.clone()),
    );
    // Absent names are left out of the item rather than stored as NULL.
    if let Some(name) = &record.name {
        item.insert(TENANT_NAME_ATTRIBUTE.to_string(), AttributeValue::S(name.clone()));
    }
    item
}

pub(crate) fn item_to_record(item: &HashMap<String, AttributeValue>) -> Option<TenantRecord> {
    let id = item.get(TENANT_ID_ATTRIBUTE)?.as_s().ok()?.clone();
    let name = item
        .get(TENANT_NAME_ATTRIBUTE)
        .and_then(|v| v.as_s().ok())
        .cloned();
    Some(TenantRecord { id, name })
}

#[async_trait]
impl TenantRecordStore for DynamoTenantRecordStore {
    async fn load(
        &self,
        session: &TenantSession,
        tenant_id: &str,
    ) -> Result<Option<TenantRecord>, DomainError> {
        let response = self
            .client_for(session)
            .get_item()
            .table_name(&self.table_name)
            .key(TENANT_ID_ATTRIBUTE, AttributeValue::S(tenant_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| {
                error!("DynamoDB GetItem failed for tenant {}: {}", tenant_id, DisplayErrorContext(&e));
                DomainError::DatabaseError(format!("GetItem failed: {}", DisplayErrorContext(&e)))
            })?;

        let record = response.item().and_then(item_to_record);
        debug!("Loaded tenant {} (found: {})", tenant_id, record.is_some());
        Ok(record)
    }

    async fn save(&self, session: &TenantSession, record: &TenantRecord) -> Result<(), DomainError> {
        info!("Writing tenant record: {}", record.id);

        self.client_for(session)
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(|e| {
                error!("DynamoDB PutItem failed for tenant {}: {}", record.id, DisplayErrorContext(&e));
                DomainError::DatabaseError(format!("PutItem failed: {}", DisplayErrorContext(&e)))
            })?;

        Ok(())
    }
}
