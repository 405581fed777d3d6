//! Gemini client, configuration and credentials.

mod credentials;
mod gemini_client;
mod gemini_config;

pub use credentials::GeminiCredentials;
pub use gemini_client::GeminiClient;
pub use gemini_config::{GeminiConfig, GeminiConfigBuilder, GeminiConfigBuilderError};
