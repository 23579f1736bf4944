//! Database module (DynamoDB adapters)

pub mod dynamodb;

pub use dynamodb::DynamoTenantRecordStore;
