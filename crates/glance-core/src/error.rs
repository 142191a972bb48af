//! Error types for the Glance analysis pipeline.
//!
//! Errors are organized by pipeline stage. Everything a user can recover from
//! (a bad upload, an empty question, a remote failure) has its own type so the
//! presentation layer can render it inline without inspecting message text.

use thiserror::Error;

/// Top-level error type for Glance operations.
#[derive(Error, Debug)]
pub enum GlanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Uploaded bytes could not be turned into an image
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// No credential found in any source
    #[error("API key not found: set {key} in the secrets file ({secrets_file}) or as an environment variable")]
    MissingCredential { key: String, secrets_file: String },
}

/// Reasons an upload is rejected by image ingest.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Zero-length upload
    #[error("Uploaded file is empty")]
    Empty,

    /// Declared file extension is not on the accepted list
    #[error("Unsupported file type {extension} (accepted: {accepted})")]
    ExtensionNotAccepted { extension: String, accepted: String },

    /// Upload exceeds the configured size cap
    #[error("File too large: {size_mb:.1}MB > {max_mb}MB")]
    TooLarge { size_mb: f64, max_mb: u64 },

    /// Bytes do not match any known image signature
    #[error("Unrecognized image format")]
    Unrecognized,

    /// Recognized image format that is not accepted
    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },

    /// Format was recognized but the payload is corrupt
    #[error("Corrupt {format} image: {message}")]
    Corrupt { format: String, message: String },

    /// Decoded image has a zero dimension
    #[error("Image has no pixels ({width}x{height})")]
    ZeroDimension { width: u32, height: u32 },
}

/// A precondition that failed at the orchestration boundary.
///
/// Image absence is checked first, so only one variant is ever reported even
/// when both inputs are missing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    /// No image has been uploaded
    #[error("Please upload an image first!")]
    ImageMissing,

    /// Question is empty after trimming
    #[error("Please enter a question!")]
    QuestionMissing,
}

impl ValidationFailure {
    /// Second line of the rejection banner.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::ImageMissing => "You need to upload an image before analyzing it.",
            Self::QuestionMissing => "You need to ask something about the image.",
        }
    }
}

/// The resolved question text was empty after trimming.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Question is empty")]
pub struct EmptyPromptError;

/// Failure raised by a remote inference backend.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct InferenceError {
    /// Verbatim description of the failure
    pub message: String,
    /// HTTP status, when the failure came from a response
    pub status_code: Option<u16>,
}

impl InferenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code: Some(status_code),
        }
    }
}

/// Convenience type alias for Glance results.
pub type Result<T> = std::result::Result<T, GlanceError>;
