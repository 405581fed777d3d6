//! Mock inference provider for testing.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! iris-core = { version = "...", features = ["test-utils"] }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{InferenceProvider, InferenceService};
use crate::analysis::{AnalysisRequest, AnalysisResult};
use crate::{Error, Result};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Failure(String),
}

#[derive(Debug, Default)]
struct Recorder {
    calls: AtomicUsize,
    last_request: Mutex<Option<AnalysisRequest>>,
}

/// Provider returning a fixed reply and recording what it was asked.
///
/// Clones share the same recorder, so a test can keep one clone and hand the
/// other to the code under test.
#[derive(Debug, Clone)]
pub struct MockProvider {
    reply: Reply,
    recorder: Arc<Recorder>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::with_response("Mock description")
    }
}

impl MockProvider {
    /// Creates a provider that always answers with `text`.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(text.into()),
            recorder: Arc::default(),
        }
    }

    /// Creates a provider that always fails with a provider error carrying `message`.
    pub fn with_failure(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Failure(message.into()),
            recorder: Arc::default(),
        }
    }

    /// Returns how many times [`InferenceProvider::infer`] was called.
    pub fn calls(&self) -> usize {
        self.recorder.calls.load(Ordering::SeqCst)
    }

    /// Returns the most recent request, if any.
    pub fn last_request(&self) -> Option<AnalysisRequest> {
        self.recorder
            .last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    /// Wraps a clone of this provider into an [`InferenceService`].
    pub fn to_service(&self) -> InferenceService {
        InferenceService::from_provider(self.clone())
    }
}

#[async_trait::async_trait]
impl InferenceProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn infer(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        self.recorder.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.recorder.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.reply {
            Reply::Text(text) => Ok(AnalysisResult::new(request.request_id, text.clone())),
            Reply::Failure(message) => Err(Error::provider().with_message(message.clone())),
        }
    }
}
