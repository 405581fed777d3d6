//! HTTP client for the iris `/analyze` endpoint.

mod analyze_client;

pub use self::analyze_client::{AnalyzeClient, DEFAULT_BASE_URL};
