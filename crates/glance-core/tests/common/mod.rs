//! Shared helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use glance_core::inference::ModelResponse;
use glance_core::{AnalysisRequest, InferenceError, VisionModel};
use std::io::Cursor;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Encode a `width`x`height` image in `format`.
pub fn encode(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

/// Deterministic model returning a fixed outcome and counting calls.
pub struct StubModel {
    outcome: Result<String, InferenceError>,
    calls: Arc<AtomicU32>,
}

impl StubModel {
    pub fn answering(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn failing(error: InferenceError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }
}

#[async_trait]
impl VisionModel for StubModel {
    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-1"
    }

    async fn generate(
        &self,
        _request: &AnalysisRequest<'_>,
    ) -> Result<ModelResponse, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map(|text| ModelResponse {
            text,
            model: "stub-1".to_string(),
            tokens_used: None,
            latency_ms: 1,
        })
    }
}
