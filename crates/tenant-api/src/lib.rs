//! # Tenant API
//!
//! Request dispatching, gateway responses, and the HTTP adapter used for
//! local serving.

pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod request;
pub mod response;

pub use dispatcher::Dispatcher;
pub use error::ApiError;
pub use request::GatewayRequest;
pub use response::{GatewayError, GatewayResponse};
