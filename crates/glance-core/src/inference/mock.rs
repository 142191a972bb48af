//! Configurable in-process model for unit tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use super::provider::{ModelResponse, VisionModel};
use crate::error::InferenceError;
use crate::types::AnalysisRequest;

/// A mock model whose answer is produced by a closure.
///
/// Each call to `generate()` invokes the response factory with the current
/// call index, and the last question seen is recorded for assertions.
pub(crate) struct MockModel {
    response_fn: Box<dyn Fn(u32) -> Result<ModelResponse, InferenceError> + Send + Sync>,
    call_count: Arc<AtomicU32>,
    last_question: Arc<Mutex<Option<String>>>,
}

impl MockModel {
    pub(crate) fn answering(text: &str) -> Self {
        let text = text.to_string();
        Self::from_fn(move |_| {
            Ok(ModelResponse {
                text: text.clone(),
                model: "mock-v1".to_string(),
                tokens_used: Some(42),
                latency_ms: 10,
            })
        })
    }

    pub(crate) fn failing(status_code: Option<u16>, message: &str) -> Self {
        let message = message.to_string();
        Self::from_fn(move |_| {
            Err(InferenceError {
                message: message.clone(),
                status_code,
            })
        })
    }

    pub(crate) fn from_fn(
        f: impl Fn(u32) -> Result<ModelResponse, InferenceError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            response_fn: Box::new(f),
            call_count: Arc::new(AtomicU32::new(0)),
            last_question: Arc::new(Mutex::new(None)),
        }
    }

    /// Shared handle to the call counter (clone before moving the model).
    pub(crate) fn call_count_handle(&self) -> Arc<AtomicU32> {
        self.call_count.clone()
    }

    pub(crate) fn last_question_handle(&self) -> Arc<Mutex<Option<String>>> {
        self.last_question.clone()
    }
}

#[async_trait]
impl VisionModel for MockModel {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-v1"
    }

    async fn generate(
        &self,
        request: &AnalysisRequest<'_>,
    ) -> Result<ModelResponse, InferenceError> {
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        *self.last_question.lock().unwrap() = Some(request.question().to_string());
        (self.response_fn)(idx)
    }
}
