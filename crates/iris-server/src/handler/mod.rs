//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use iris_server::handler::routes;
//! use iris_server::service::{ServiceConfig, ServiceState};
//!
//! let state = ServiceState::from_config(ServiceConfig::default(), inference)?;
//! let router = routes(&state).with_state(state);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod analyze;
mod error;
mod health;
mod request;
mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::AnalyzeForm;
pub use crate::handler::response::{Description, ErrorResponse, Health};
use crate::service::ServiceState;

async fn not_found() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Health and analysis routes, with a JSON 404 for anything else.
pub fn routes(state: &ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(health::routes())
        .merge(analyze::routes(state.config().max_upload_size))
        .fallback(not_found)
}
