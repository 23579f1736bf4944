//! Object storage adapters

pub mod s3_template_source;

pub use s3_template_source::S3TemplateSource;
