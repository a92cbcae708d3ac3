use super::mime::{detect_image_mime, normalize_mime, supported_format};
use crate::{Error, Result};
use base64::Engine as _;
use image::ImageFormat;

/// A validated receipt image, kept in its original container encoding.
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    mime_type: String,
    width: u32,
    height: u32,
}

/// Base64 inline payload ready to embed in a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl SourceImage {
    /// Validate `bytes` by decoding them in their sniffed container format.
    ///
    /// `declared_mime` is the media type reported by the upload. An empty value
    /// falls back to the sniffed type; a value that disagrees with the sniffed
    /// type is kept but logged.
    pub fn from_bytes(bytes: Vec<u8>, declared_mime: &str) -> Result<Self> {
        let detected = detect_image_mime(&bytes)
            .ok_or_else(|| Error::UnsupportedFormat("unrecognized image data".to_string()))?;
        let format = supported_format(detected)
            .ok_or_else(|| Error::UnsupportedFormat(detected.to_string()))?;

        let mime_type = if declared_mime.trim().is_empty() {
            detected
        } else {
            let declared = normalize_mime(declared_mime)
                .ok_or_else(|| Error::UnsupportedFormat(declared_mime.trim().to_string()))?;
            if declared != detected {
                tracing::warn!(
                    "Declared media type {} does not match image data ({}); sending {}",
                    declared,
                    detected,
                    declared
                );
            }
            declared
        };

        let decoded = image::load_from_memory_with_format(&bytes, format)?;

        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            bytes,
            format,
            mime_type: mime_type.to_string(),
        })
    }

    /// Same as [`SourceImage::from_bytes`], with decoding moved off the async runtime.
    pub async fn load(bytes: Vec<u8>, declared_mime: String) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::from_bytes(bytes, &declared_mime))
            .await
            .map_err(|e| Error::Invariant(format!("Image decoding task join error: {}", e)))?
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Encode the image's original bytes as standard padded base64.
pub fn encode(image: &SourceImage) -> EncodedImage {
    EncodedImage {
        mime_type: image.mime_type.clone(),
        data: base64::engine::general_purpose::STANDARD.encode(&image.bytes),
    }
}
