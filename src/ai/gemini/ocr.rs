use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part};
use crate::ai::{ExtractionRequest, TextExtractionService};
use crate::error::ResponseShape;
use crate::models::{Config, Extraction};
use crate::{Error, Result};
use async_trait::async_trait;

/// Receipt text extraction through Gemini `generateContent`.
pub struct GeminiOcrClient {
    http: GeminiHttpClient,
}

impl GeminiOcrClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        client: reqwest::Client,
    ) -> Result<Self> {
        Ok(Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.gemini_api_key.clone(), config.gemini_model.clone())?
            .with_base_url(config.gemini_base_url.clone()))
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    /// Wire payload: one content entry, instruction part first, image second.
    pub fn build_request(request: &ExtractionRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::Text {
                        text: request.prompt.clone(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: request.mime_type.clone(),
                            data: request.image_data.clone(),
                        },
                    },
                ],
            }],
        }
    }

    /// Resolve `candidates[0].content.parts[0].text`.
    ///
    /// A missing link before the part is a shape error; a part whose text is
    /// absent or empty is an empty extraction.
    pub fn interpret_response(response: GenerateContentResponse) -> Result<Extraction> {
        let block_reason = response.prompt_feedback.and_then(|f| f.block_reason);

        let candidate = response
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .ok_or(Error::ResponseShape(ResponseShape::NoCandidates {
                block_reason,
            }))?;

        if let Some(reason) = &candidate.finish_reason {
            tracing::debug!("Gemini finish reason: {}", reason);
        }

        let part = candidate
            .content
            .ok_or(Error::ResponseShape(ResponseShape::MissingContent))?
            .parts
            .and_then(|parts| parts.into_iter().next())
            .ok_or(Error::ResponseShape(ResponseShape::NoParts))?;

        match part.text {
            Some(text) if !text.is_empty() => Ok(Extraction::Text(text)),
            _ => Ok(Extraction::Empty),
        }
    }
}

#[async_trait]
impl TextExtractionService for GeminiOcrClient {
    async fn extract_text(&self, request: &ExtractionRequest) -> Result<Extraction> {
        tracing::debug!(
            "Extracting receipt text via Gemini ({}, {} base64 chars)",
            request.mime_type,
            request.image_data.len()
        );

        let payload = Self::build_request(request);
        let response: GenerateContentResponse = self.http.generate_content(&payload).await?;

        Self::interpret_response(response)
    }
}
