//! Application state and dependency injection.

mod analyzer;
mod config;
mod state;

pub use iris_core::{Error, ErrorKind, Result};

pub use crate::service::analyzer::Analyzer;
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder, ServiceConfigBuilderError};
pub use crate::service::state::ServiceState;
