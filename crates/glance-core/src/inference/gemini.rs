//! Gemini provider using the `generateContent` REST API.
//!
//! Sends the question and the image as two parts of a single user turn.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::provider::{ImageInput, ModelResponse, VisionModel};
use crate::config::InferenceConfig;
use crate::credentials::Credential;
use crate::error::InferenceError;
use crate::types::AnalysisRequest;

/// Gemini provider.
///
/// No request timeout is set: the transport default applies.
pub struct GeminiProvider {
    credential: Credential,
    model: String,
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(credential: Credential, config: &InferenceConfig) -> Self {
        Self {
            credential,
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

// --- Request types ---

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

// --- Response types ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    total_token_count: Option<u32>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    status: Option<String>,
}

/// One user turn: the question text first, then the image as inline data.
fn request_body(request: &AnalysisRequest<'_>) -> GenerateContentRequest {
    let image = ImageInput::from_image(request.image());
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                Part::Text {
                    text: request.question().to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.media_type,
                        data: image.data,
                    },
                },
            ],
        }],
    }
}

/// Prefer the API's own error message; fall back to the raw body.
fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{} ({status})", envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body.trim().to_string(),
    }
}

/// Error for a non-2xx reply, keeping whatever the body says.
fn http_error<E: std::fmt::Display>(
    status: reqwest::StatusCode,
    body: Result<String, E>,
) -> InferenceError {
    let detail = match body {
        Ok(body) => describe_error_body(&body),
        Err(e) => format!("<body unreadable: {e}>"),
    };
    InferenceError::with_status(format!("Gemini HTTP {status}: {detail}"), status.as_u16())
}

/// Returns `(text, model_version, total_tokens)` from the first candidate.
fn extract_text(
    resp: GenerateContentResponse,
) -> Result<(String, Option<String>, Option<u32>), InferenceError> {
    let tokens = resp.usage_metadata.and_then(|u| u.total_token_count);

    let Some(candidate) = resp.candidates.into_iter().next() else {
        let reason = resp
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "unknown".to_string());
        return Err(InferenceError::new(format!(
            "Gemini returned no candidates (block reason: {reason})"
        )));
    };

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(InferenceError::new(format!(
            "Gemini returned no text (finish reason: {reason})"
        )));
    }

    Ok((text, resp.model_version, tokens))
}

#[async_trait]
impl VisionModel for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        request: &AnalysisRequest<'_>,
    ) -> Result<ModelResponse, InferenceError> {
        let start = Instant::now();
        let body = request_body(request);

        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::new(format!("Gemini request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(http_error(status, resp.text().await));
        }

        let parsed: GenerateContentResponse = resp.json().await.map_err(|e| {
            InferenceError::new(format!("Failed to parse Gemini response: {e}"))
        })?;

        let (text, model_version, tokens_used) = extract_text(parsed)?;

        Ok(ModelResponse {
            text,
            model: model_version.unwrap_or_else(|| self.model.clone()),
            tokens_used,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
