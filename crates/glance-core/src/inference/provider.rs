//! Vision model trait and request/response types.

use async_trait::async_trait;
use base64::Engine;

use crate::error::InferenceError;
use crate::ingest::UploadedImage;
use crate::types::AnalysisRequest;

/// Base64-encoded image ready to send to a model API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Encode the original upload bytes, untouched.
    pub fn from_image(image: &UploadedImage) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(image.bytes()),
            media_type: image.mime_type().to_string(),
        }
    }
}

/// A generated answer.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    /// Generated text
    pub text: String,
    /// Model identifier reported by the service
    pub model: String,
    /// Total tokens used, if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that every inference backend implements.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn VisionModel>` for dynamic dispatch).
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Backend name for logging (e.g., "gemini").
    fn name(&self) -> &str;

    /// Configured model identifier.
    fn model(&self) -> &str;

    /// Answer the request's question about its image. Exactly one attempt.
    async fn generate(&self, request: &AnalysisRequest<'_>)
        -> Result<ModelResponse, InferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{encode_test_image, ImageIngest};

    #[test]
    fn test_image_input_preserves_bytes() {
        let bytes = encode_test_image(3, 3, image::ImageFormat::Png);
        let img = ImageIngest::default().decode(bytes.clone()).unwrap();
        let input = ImageInput::from_image(&img);

        assert_eq!(input.media_type, "image/png");
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&input.data)
            .unwrap();
        assert_eq!(decoded, bytes);
    }
}
