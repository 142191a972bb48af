//! Core data types passed between pipeline stages.

use serde::{Deserialize, Serialize};

use crate::ingest::UploadedImage;

/// One validated question about one image.
///
/// Only the orchestrator builds these, after both inputs have been checked.
#[derive(Debug, Clone)]
pub struct AnalysisRequest<'a> {
    question: String,
    image: &'a UploadedImage,
}

impl<'a> AnalysisRequest<'a> {
    pub(crate) fn new(question: String, image: &'a UploadedImage) -> Self {
        Self { question, image }
    }

    /// Trimmed, non-empty question text.
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn image(&self) -> &'a UploadedImage {
        self.image
    }
}

/// Outcome of a dispatched analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    /// The model answered
    Success { text: String },
    /// The remote call failed; `message` is the failure's own description
    Failure { kind: FailureKind, message: String },
}

impl AnalysisResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn remote_error(message: impl Into<String>) -> Self {
        Self::Failure {
            kind: FailureKind::RemoteError,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Category of a failed analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Any failure of the remote inference call
    RemoteError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_json_shape() {
        let json = serde_json::to_value(AnalysisResult::success("A cat.")).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["text"], "A cat.");
    }

    #[test]
    fn test_failure_json_shape() {
        let json = serde_json::to_value(AnalysisResult::remote_error("HTTP 429")).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["kind"], "remote_error");
        assert_eq!(json["message"], "HTTP 429");
    }
}
