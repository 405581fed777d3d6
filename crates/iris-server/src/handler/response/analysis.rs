use iris_core::analysis::AnalysisResult;
use serde::{Deserialize, Serialize};

/// Successful `POST /analyze` body.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// Generated description, possibly empty.
    pub description: String,
}

impl From<AnalysisResult> for Description {
    fn from(result: AnalysisResult) -> Self {
        Self {
            description: result.into_text(),
        }
    }
}
