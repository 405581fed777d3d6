#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod error;
mod provider;
pub mod typed;

pub use crate::client::{
    GeminiClient, GeminiConfig, GeminiConfigBuilder, GeminiConfigBuilderError, GeminiCredentials,
};
pub use crate::error::{Error, Result};

/// Tracing target for Gemini client operations.
pub const TRACING_TARGET: &str = "iris_gemini::client";
