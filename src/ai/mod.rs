//! AI service integration for receipt text extraction
//!
//! Defines the extraction seam used by the pipeline and its Gemini-backed
//! and scripted implementations.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiOcrClient;
pub use mock::MockTextExtractionClient;

use crate::image::EncodedImage;
use crate::models::Extraction;
use crate::{prompts, Result};
use async_trait::async_trait;

/// Instruction plus inline image, built fresh for every extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub prompt: String,
    pub mime_type: String,
    pub image_data: String,
}

impl ExtractionRequest {
    /// Pair the fixed receipt prompt with an encoded image.
    pub fn new(image: &EncodedImage) -> Self {
        Self {
            prompt: prompts::RECEIPT_EXTRACTION.to_string(),
            mime_type: image.mime_type.clone(),
            image_data: image.data.clone(),
        }
    }
}

#[async_trait]
pub trait TextExtractionService: Send + Sync {
    async fn extract_text(&self, request: &ExtractionRequest) -> Result<Extraction>;
}
