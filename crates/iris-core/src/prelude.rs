//! Convenient re-exports for common use.

pub use crate::analysis::{AnalysisRequest, AnalysisResult, DEFAULT_INSTRUCTION, Part};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::image::{ImageBytes, NORMALIZED_MEDIA_TYPE, NormalizedImage};
pub use crate::inference::{InferenceProvider, InferenceService};
