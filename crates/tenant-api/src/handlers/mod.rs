//! HTTP handlers

pub mod local;

pub use local::router;
