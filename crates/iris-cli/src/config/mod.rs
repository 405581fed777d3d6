//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig          # Host, port, shutdown
//! ├── middleware: MiddlewareConfig  # CORS, request timeout
//! ├── service: ServiceConfig        # API key, upload limit, normalizer
//! └── gemini: GeminiConfig          # Gemini endpoint, model, timeouts
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! iris --port 3333 --gemini-model gemini-2.5-flash
//!
//! # Or via environment variables
//! GOOGLE_GEMINI_API_KEY="..." PORT=3333 iris
//! ```

mod middleware;
mod provider;
mod server;

use std::process;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use iris_gemini::GeminiConfig;
use iris_server::service::ServiceConfig;
pub use middleware::MiddlewareConfig;
pub use provider::create_inference_service;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Output format of log lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "iris")]
#[command(about = "Describes images with a multimodal language model")]
#[command(version)]
pub struct Cli {
    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    #[serde(default)]
    pub log_format: LogFormat,

    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Analysis service configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Gemini client configuration.
    #[clap(flatten)]
    pub gemini: GeminiConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so clap can use its values as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    ///
    /// A missing API key is not an error: the server starts and answers
    /// analysis requests with a configuration error until one is provided.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.middleware
            .validate()
            .context("invalid middleware configuration")?;
        self.service
            .normalizer_config()
            .context("invalid image configuration")?;
        self.gemini
            .endpoint()
            .context("invalid Gemini configuration")?;

        if !self.service.has_credentials() {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                "GOOGLE_GEMINI_API_KEY is not set; analysis requests will fail until it is"
            );
        }

        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            credentials = self.service.has_credentials(),
            max_upload_size = self.service.max_upload_size,
            image_max_width = self.service.image_max_width,
            image_quality = self.service.image_quality,
            "Service configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            base_url = %self.gemini.base_url,
            model = %self.gemini.model_name(),
            timeout_secs = self.gemini.timeout_secs,
            "Gemini configuration"
        );
    }

    fn log_build_info() {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            "Starting iris server"
        );

        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("iris").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn defaults_are_valid() {
        let cli = parse(&["--host", "127.0.0.1", "--port", "3333"]);
        assert_eq!(cli.server.port, 3333);
        assert_eq!(cli.log_format, LogFormat::Text);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn flags_reach_every_group() {
        let cli = parse(&[
            "--port",
            "4000",
            "--log-format",
            "json",
            "--request-timeout",
            "30",
            "--gemini-model",
            "gemini-2.0-flash",
            "--gemini-api-key",
            "key",
        ]);

        assert_eq!(cli.server.port, 4000);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.middleware.recovery.request_timeout, 30);
        assert_eq!(cli.gemini.model_name(), "gemini-2.0-flash");
        assert!(cli.service.has_credentials());
    }

    #[test]
    fn invalid_quality_is_rejected() {
        let cli = parse(&["--image-quality", "0"]);
        assert!(cli.validate().is_err());
    }
}
