//! Tracing setup.

mod tracing;

use anyhow::Context;

use crate::config::LogFormat;

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed or `RUST_LOG` is
/// not a valid filter.
pub(crate) fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    tracing::init_tracing(format).context("Failed to initialize tracing")
}
