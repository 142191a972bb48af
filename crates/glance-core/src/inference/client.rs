//! Single-attempt inference client.

use super::gemini::GeminiProvider;
use super::provider::VisionModel;
use crate::config::InferenceConfig;
use crate::credentials::Credential;
use crate::types::{AnalysisRequest, AnalysisResult};

/// Calls a [`VisionModel`] exactly once per request and maps the outcome.
///
/// Failure subtypes (network, auth, quota, bad request) are not distinguished:
/// every error becomes a `RemoteError` carrying its own description.
pub struct InferenceClient {
    model: Box<dyn VisionModel>,
}

impl InferenceClient {
    pub fn new(model: Box<dyn VisionModel>) -> Self {
        Self { model }
    }

    /// Client for the hosted Gemini API, authorized by `credential`.
    pub fn gemini(credential: Credential, config: &InferenceConfig) -> Self {
        Self::new(Box::new(GeminiProvider::new(credential, config)))
    }

    /// Model identifier requests are sent to.
    pub fn model_name(&self) -> &str {
        self.model.model()
    }

    /// Send the request and wrap the answer or the failure.
    pub async fn analyze(&self, request: &AnalysisRequest<'_>) -> AnalysisResult {
        tracing::debug!(
            "Sending question ({} chars) to {}/{} with {} image ({} bytes)",
            request.question().chars().count(),
            self.model.name(),
            self.model.model(),
            request.image().format(),
            request.image().byte_len()
        );

        match self.model.generate(request).await {
            Ok(response) => {
                tracing::info!(
                    model = %response.model,
                    latency_ms = response.latency_ms,
                    tokens = ?response.tokens_used,
                    "Analysis complete"
                );
                AnalysisResult::success(response.text)
            }
            Err(e) => {
                tracing::warn!(status = ?e.status_code, "Analysis failed: {e}");
                AnalysisResult::remote_error(e.message)
            }
        }
    }
}
