//! Glance Core - ask a hosted multimodal model questions about an image.
//!
//! # Architecture
//!
//! ```text
//! Upload → Ingest (decode, JPEG/PNG only) ┐
//!                                         ├→ Orchestrator (validate) → Gemini → AnalysisResult
//! Catalog / free text → Prompt Selector   ┘
//! ```
//!
//! The API credential is resolved once at startup and handed to the inference
//! client; nothing else is shared between analysis actions.
//!
//! # Usage
//!
//! ```rust,ignore
//! use glance_core::{Config, CredentialResolver, Glance, SecretStore};
//!
//! #[tokio::main]
//! async fn main() -> glance_core::Result<()> {
//!     let config = Config::load()?;
//!     let secrets = SecretStore::load(&config.secrets_path())?;
//!     let credential = CredentialResolver::standard(secrets)
//!         .resolve()
//!         .expect("GOOGLE_API_KEY not set");
//!     let glance = Glance::new(config, credential);
//!
//!     let image = glance.ingest_path("./cat.jpg".as_ref())?;
//!     let result = glance.submit(Some(&image), "What's in this image?").await;
//!     println!("{result:?}");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod credentials;
pub mod error;
pub mod inference;
pub mod ingest;
pub mod orchestrator;
pub mod prompts;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use credentials::{Credential, CredentialResolver, CredentialSource, Environment, SecretStore};
pub use error::{
    ConfigError, DecodeError, EmptyPromptError, GlanceError, InferenceError, Result,
    ValidationFailure,
};
pub use inference::{InferenceClient, VisionModel};
pub use ingest::{ImageFormat, ImageIngest, Upload, UploadedImage};
pub use orchestrator::Orchestrator;
pub use prompts::{PromptCatalog, PromptSelection, PromptSelector};
pub use types::{AnalysisRequest, AnalysisResult, FailureKind};

use std::path::Path;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Glance session - the main entry point.
///
/// Bundles the ingest stage, the prompt selector and the orchestrator built
/// from one configuration and one credential.
pub struct Glance {
    config: Config,
    ingest: ImageIngest,
    prompts: PromptSelector,
    orchestrator: Orchestrator,
}

impl Glance {
    /// Create a session that talks to Gemini with `credential`.
    pub fn new(config: Config, credential: Credential) -> Self {
        let client = InferenceClient::gemini(credential, &config.inference);
        Self::with_client(config, client)
    }

    /// Create a session around an existing inference client.
    pub fn with_client(config: Config, client: InferenceClient) -> Self {
        tracing::debug!(
            "Initializing Glance v{} (model: {})",
            VERSION,
            client.model_name()
        );
        Self {
            ingest: ImageIngest::new(config.limits.clone()),
            prompts: PromptSelector::default(),
            orchestrator: Orchestrator::new(client),
            config,
        }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn prompts(&self) -> &PromptSelector {
        &self.prompts
    }

    pub fn model_name(&self) -> &str {
        self.orchestrator.client().model_name()
    }

    /// Decode an upload.
    pub fn ingest(&self, upload: Upload) -> std::result::Result<UploadedImage, DecodeError> {
        self.ingest.ingest(upload)
    }

    /// Read a file from disk and decode it.
    ///
    /// The file name supplies the declared extension.
    pub fn ingest_path(&self, path: &Path) -> Result<UploadedImage> {
        let upload = Upload::read(path)?;
        Ok(self.ingest.ingest(upload)?)
    }

    /// Run one analysis action. See [`Orchestrator::submit`].
    pub async fn submit(
        &self,
        image: Option<&UploadedImage>,
        question: &str,
    ) -> std::result::Result<AnalysisResult, ValidationFailure> {
        self.orchestrator.submit(image, question).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::mock::MockModel;
    use crate::ingest::encode_test_image;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_glance_new_uses_configured_model() {
        let mut config = Config::default();
        config.inference.model = "gemini-2.5-pro".to_string();
        let glance = Glance::new(config, Credential::new("k"));
        assert_eq!(glance.model_name(), "gemini-2.5-pro");
    }

    #[test]
    fn test_ingest_path_reads_and_decodes() {
        let glance = Glance::with_client(
            Config::default(),
            InferenceClient::new(Box::new(MockModel::answering("unused"))),
        );
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("photo.jpeg");
        std::fs::write(&path, encode_test_image(30, 20, image::ImageFormat::Jpeg)).unwrap();
        let image = glance.ingest_path(&path).unwrap();
        assert_eq!(image.format(), ImageFormat::Jpeg);
        assert_eq!((image.width(), image.height()), (30, 20));

        let missing = glance.ingest_path(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(missing, GlanceError::Io(_)));

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, b"hello").unwrap();
        let rejected = glance.ingest_path(&text).unwrap_err();
        assert!(matches!(
            rejected,
            GlanceError::Decode(DecodeError::ExtensionNotAccepted { .. })
        ));
    }

    #[tokio::test]
    async fn test_ingest_then_submit() {
        let client = InferenceClient::new(Box::new(MockModel::answering("Orange square.")));
        let glance = Glance::with_client(Config::default(), client);

        let upload = Upload::new(
            "square.png",
            encode_test_image(12, 12, image::ImageFormat::Png),
        );
        let image = glance.ingest(upload).unwrap();
        let result = glance.submit(Some(&image), "What colors are dominant?").await;
        assert_eq!(result, Ok(AnalysisResult::success("Orange square.")));
    }
}
