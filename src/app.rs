//! Extraction pipeline orchestration: validate, encode, request, interpret.

use crate::ai::{ExtractionRequest, GeminiOcrClient, TextExtractionService};
use crate::image::{encode, mime, SourceImage};
use crate::models::{Config, Extraction};
use crate::Result;
use std::path::Path;
use tracing::{info, warn};

/// Runs one receipt extraction per call; holds no per-request state.
pub struct App {
    extractor: Box<dyn TextExtractionService>,
}

impl App {
    /// Build an app around an injected extraction service.
    ///
    /// Primarily useful for integration tests and local harnesses that need
    /// to inject mocks.
    pub fn with_services(extractor: Box<dyn TextExtractionService>) -> Self {
        Self { extractor }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GeminiOcrClient::from_config(config)?;
        info!("Extraction provider: Gemini (model: {})", client.model());
        Ok(Self::with_services(Box::new(client)))
    }

    /// Extract the text of a receipt image held in memory.
    pub async fn extract(&self, image_bytes: Vec<u8>, mime_type: &str) -> Result<Extraction> {
        let source = SourceImage::load(image_bytes, mime_type.to_string()).await?;
        let (width, height) = source.dimensions();
        info!(
            "Loaded {}x{} {} receipt ({} bytes)",
            width,
            height,
            source.mime_type(),
            source.bytes().len()
        );

        let request = ExtractionRequest::new(&encode(&source));
        drop(source);

        let outcome = self.extractor.extract_text(&request).await?;
        match &outcome {
            Extraction::Text(text) => info!("Text extracted ({} chars)", text.chars().count()),
            Extraction::Empty => warn!("No text was extracted from the receipt"),
        }
        Ok(outcome)
    }

    /// Read a receipt from disk and extract its text.
    ///
    /// Without `mime_type`, the media type comes from the file extension, and
    /// failing that from the image data itself.
    pub async fn extract_file(&self, path: &Path, mime_type: Option<&str>) -> Result<Extraction> {
        let bytes = tokio::fs::read(path).await?;
        let mime_type = mime_type
            .or_else(|| mime::mime_from_extension(path))
            .unwrap_or_default();

        info!("Reading receipt from {}", path.display());
        self.extract(bytes, mime_type).await
    }
}
