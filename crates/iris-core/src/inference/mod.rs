//! Inference provider abstraction.
//!
//! Providers implement [`InferenceProvider`]; the rest of the system talks to
//! them through [`InferenceService`], which adds request-scoped logging.
//!
//! # Example
//!
//! ```rust,ignore
//! use iris_core::analysis::AnalysisRequest;
//! use iris_core::inference::InferenceService;
//!
//! let service = InferenceService::from_provider(my_provider);
//! let request = AnalysisRequest::compose(None, normalized_image);
//! let result = service.infer(&request).await?;
//! ```

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
mod mock;
mod service;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use mock::MockProvider;
pub use service::InferenceService;

use crate::Result;
use crate::analysis::{AnalysisRequest, AnalysisResult};

/// Tracing target for inference operations.
pub const TRACING_TARGET: &str = "iris_core::inference";

/// A hosted or local model that turns an [`AnalysisRequest`] into text.
///
/// Implementations perform exactly one upstream call per [`infer`] and never
/// retry. Upstream failures are reported as [`ErrorKind::Provider`];
/// [`ErrorKind::Configuration`] is reserved for local setup problems.
///
/// [`infer`]: InferenceProvider::infer
/// [`ErrorKind::Provider`]: crate::ErrorKind::Provider
/// [`ErrorKind::Configuration`]: crate::ErrorKind::Configuration
#[async_trait::async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Generates a description for the request.
    ///
    /// A response without any text is a success with empty text.
    async fn infer(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;
}
