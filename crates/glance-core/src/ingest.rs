//! Upload decoding with format detection and size limits.
//!
//! Format is detected from the content, never from the file name. The decoded
//! pixels are only used to prove the payload is a real image and to read its
//! dimensions; the original bytes are what gets forwarded to the model.

use std::fmt;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::DecodeError;

/// Image formats the pipeline accepts.
pub const ACCEPTED_FORMATS: &[ImageFormat] = &[ImageFormat::Jpeg, ImageFormat::Png];

/// File extensions the upload boundary accepts (lowercase).
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Declared format of an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    fn from_detected(format: image::ImageFormat) -> Option<Self> {
        let candidate = match format {
            image::ImageFormat::Jpeg => Self::Jpeg,
            image::ImageFormat::Png => Self::Png,
            _ => return None,
        };
        ACCEPTED_FORMATS.contains(&candidate).then_some(candidate)
    }

    fn as_detected(self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
        }
    }

    /// MIME type sent alongside the image bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg => write!(f, "JPEG"),
            Self::Png => write!(f, "PNG"),
        }
    }
}

/// Raw bytes handed over by the presentation layer.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Declared file name, used only for the extension check
    pub file_name: String,
    /// Uploaded content
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read an upload from disk.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { file_name, bytes })
    }

    /// Lowercased extension of the declared file name.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }
}

/// A successfully decoded upload.
///
/// Width and height are always non-zero and the format is always one of
/// [`ACCEPTED_FORMATS`].
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    format: ImageFormat,
}

impl UploadedImage {
    /// Original, unmodified bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Details line, e.g. `PNG • 640x480 pixels`.
    pub fn summary(&self) -> String {
        format!("{} • {}x{} pixels", self.format, self.width, self.height)
    }
}

// Bytes are omitted; a multi-megabyte Vec in debug output is useless.
impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Decodes uploads into [`UploadedImage`]s.
#[derive(Debug, Clone, Default)]
pub struct ImageIngest {
    limits: LimitsConfig,
}

impl ImageIngest {
    /// Create a new ingest stage with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Check the declared extension and the size cap, then decode.
    pub fn ingest(&self, upload: Upload) -> Result<UploadedImage, DecodeError> {
        match upload.extension() {
            Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => {}
            other => {
                return Err(DecodeError::ExtensionNotAccepted {
                    extension: other
                        .map(|e| format!(".{e}"))
                        .unwrap_or_else(|| "(none)".to_string()),
                    accepted: ACCEPTED_EXTENSIONS.join(", "),
                });
            }
        }

        let size = upload.bytes.len() as u64;
        if size > self.limits.max_upload_bytes() {
            return Err(DecodeError::TooLarge {
                size_mb: size as f64 / (1024.0 * 1024.0),
                max_mb: self.limits.max_upload_mb,
            });
        }

        tracing::debug!("Ingesting {} ({size} bytes)", upload.file_name);
        self.decode(upload.bytes)
    }

    /// Interpret `bytes` as an image in one of the accepted formats.
    pub fn decode(&self, bytes: Vec<u8>) -> Result<UploadedImage, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }

        let detected = image::guess_format(&bytes).map_err(|_| DecodeError::Unrecognized)?;
        let format =
            ImageFormat::from_detected(detected).ok_or_else(|| DecodeError::UnsupportedFormat {
                format: format_name(detected),
            })?;

        let decoded =
            image::load_from_memory_with_format(&bytes, format.as_detected()).map_err(|e| {
                DecodeError::Corrupt {
                    format: format.to_string(),
                    message: e.to_string(),
                }
            })?;

        let (width, height) = (decoded.width(), decoded.height());
        if width == 0 || height == 0 {
            return Err(DecodeError::ZeroDimension { width, height });
        }

        tracing::debug!("Decoded {format} image {width}x{height}");
        Ok(UploadedImage {
            bytes,
            width,
            height,
            format,
        })
    }
}

fn format_name(format: image::ImageFormat) -> String {
    format
        .extensions_str()
        .first()
        .map(|e| e.to_ascii_uppercase())
        .unwrap_or_else(|| format!("{format:?}"))
}

/// Encode a solid test image in memory.
#[cfg(test)]
pub(crate) fn encode_test_image(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([200, 120, 40]),
    ));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingest() -> ImageIngest {
        ImageIngest::default()
    }

    #[test]
    fn test_decode_png_dimensions() {
        let bytes = encode_test_image(64, 48, image::ImageFormat::Png);
        let img = ingest().decode(bytes.clone()).unwrap();
        assert_eq!(img.format(), ImageFormat::Png);
        assert_eq!((img.width(), img.height()), (64, 48));
        assert_eq!(img.bytes(), bytes.as_slice());
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let bytes = encode_test_image(31, 17, image::ImageFormat::Jpeg);
        let img = ingest().decode(bytes).unwrap();
        assert_eq!(img.format(), ImageFormat::Jpeg);
        assert_eq!((img.width(), img.height()), (31, 17));
        assert_eq!(img.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_decode_rejects_other_formats() {
        let bytes = encode_test_image(8, 8, image::ImageFormat::Bmp);
        let err = ingest().decode(bytes).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat { ref format } if format == "BMP"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = ingest().decode(b"definitely not an image".to_vec()).unwrap_err();
        assert!(matches!(err, DecodeError::Unrecognized));
    }

    #[test]
    fn test_decode_rejects_truncated_png() {
        let mut bytes = encode_test_image(32, 32, image::ImageFormat::Png);
        bytes.truncate(20);
        let err = ingest().decode(bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Corrupt { .. }));
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert!(matches!(ingest().decode(Vec::new()), Err(DecodeError::Empty)));
    }

    /// PNG of pseudo-random pixels, so it does not compress below ~3 bytes/pixel.
    fn noisy_png(width: u32, height: u32) -> Vec<u8> {
        let mut state: u32 = 0x9E37_79B9;
        let img = image::RgbImage::from_fn(width, height, |_, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, _] = state.to_le_bytes();
            image::Rgb([r, g, b])
        });
        let mut buf = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_ingest_enforces_size_cap() {
        let capped = ImageIngest::new(LimitsConfig { max_upload_mb: 1 });
        let bytes = noisy_png(800, 800);
        assert!(bytes.len() > 1024 * 1024);

        let err = capped
            .ingest(Upload::new("noise.png", bytes))
            .unwrap_err();
        assert!(matches!(err, DecodeError::TooLarge { max_mb: 1, .. }));
    }

    #[test]
    fn test_decode_ignores_size_cap() {
        let capped = ImageIngest::new(LimitsConfig { max_upload_mb: 1 });
        let bytes = noisy_png(800, 800);
        assert!(bytes.len() > 1024 * 1024);

        let img = capped.decode(bytes).unwrap();
        assert_eq!((img.width(), img.height()), (800, 800));
        assert_eq!(img.format(), ImageFormat::Png);
    }

    #[test]
    fn test_format_detected_by_content() {
        // PNG content under a .jpg name is still a PNG
        let bytes = encode_test_image(10, 10, image::ImageFormat::Png);
        let img = ingest().ingest(Upload::new("photo.JPG", bytes)).unwrap();
        assert_eq!(img.format(), ImageFormat::Png);
    }

    #[test]
    fn test_ingest_rejects_extension() {
        let bytes = encode_test_image(10, 10, image::ImageFormat::Png);
        let err = ingest().ingest(Upload::new("photo.gif", bytes)).unwrap_err();
        match err {
            DecodeError::ExtensionNotAccepted { extension, accepted } => {
                assert_eq!(extension, ".gif");
                assert_eq!(accepted, "jpg, jpeg, png");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ingest_rejects_missing_extension() {
        let bytes = encode_test_image(10, 10, image::ImageFormat::Png);
        let err = ingest().ingest(Upload::new("photo", bytes)).unwrap_err();
        assert!(matches!(err, DecodeError::ExtensionNotAccepted { .. }));
    }

    #[test]
    fn test_upload_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, encode_test_image(5, 6, image::ImageFormat::Png)).unwrap();

        let upload = Upload::read(&path).unwrap();
        assert_eq!(upload.file_name, "cat.png");
        assert_eq!(upload.extension().as_deref(), Some("png"));
    }

    #[test]
    fn test_summary() {
        let bytes = encode_test_image(640, 480, image::ImageFormat::Png);
        let img = ingest().decode(bytes).unwrap();
        assert_eq!(img.summary(), "PNG • 640x480 pixels");
    }
}
