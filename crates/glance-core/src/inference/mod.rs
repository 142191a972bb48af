//! Remote multimodal inference.
//!
//! A [`VisionModel`] backend answers one question about one image; the
//! [`InferenceClient`] calls it once and folds any failure into an
//! [`AnalysisResult`](crate::types::AnalysisResult).

pub(crate) mod client;
pub(crate) mod gemini;
pub(crate) mod provider;

#[cfg(test)]
pub(crate) mod mock;

pub use client::InferenceClient;
pub use gemini::GeminiProvider;
pub use provider::{ImageInput, ModelResponse, VisionModel};
