use crate::models::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Lightweight Gemini REST client.
///
/// The API key travels as the `key` query parameter and is stripped from any
/// transport error before it is logged or returned.
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-2.5-flash`);
    /// a `models/` prefix is accepted and stripped. A blank key is rejected.
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Self::new_with_client(api_key, model, Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Config("Gemini API key is empty".to_string()));
        }

        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();
        let model = if model.is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            model
        };

        Ok(Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// `generateContent` URL for the configured model, without credentials.
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Calls Gemini's `generateContent` endpoint once.
    pub async fn generate_content<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        request: &Req,
    ) -> Result<Resp> {
        let url = self.generate_content_url();
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Failed to send request to Gemini: {}", e);
                Error::Transport(e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Failed to read Gemini response body ({}): {}", status, e);
                Error::ResponseBody(e)
            })?;

        if !status.is_success() {
            tracing::error!("Gemini API error (status {}): {}", status, body);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            Error::ResponseParse(e)
        })
    }
}
