//! Application-wide constants

pub const DEFAULT_WORK_DIR: &str = "/tmp";
pub const TEMPLATE_ARCHIVE_NAME: &str = "templates.zip";
pub const POLICY_DIR_NAME: &str = "policies";

pub const DEFAULT_TENANT_CLAIM: &str = "custom:tenant_id";

pub const TENANT_ID_ATTRIBUTE: &str = "tenant-id";
pub const TENANT_NAME_ATTRIBUTE: &str = "name";

pub const CONTENT_TYPE_JSON: &str = "application/json";

pub const DEFAULT_LOCAL_HOST: &str = "127.0.0.1";
pub const DEFAULT_LOCAL_PORT: u16 = 3000;
