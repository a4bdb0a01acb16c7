use crate::models::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("No API key configured. Set GEMINI_API_KEY or add api_key to the config file.")]
    MissingApiKey,

    #[error("Request to the Gemini API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Could not decode the Gemini response: {0}")]
    Decode(String),

    #[error("The request was blocked by the service: {reason}")]
    Blocked { reason: String },

    #[error("The service returned no content.")]
    EmptyResponse,
}

/// Non-streaming client for `models/{model}:generateContent`.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        )
    }

    /// Send one request and return the answer text of the first candidate.
    pub async fn generate_text(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        let response = self.generate_content(model, request).await?;
        if let Some(text) = response.text() {
            return Ok(text);
        }
        match response.block_reason() {
            Some(reason) => Err(GeminiError::Blocked {
                reason: reason.to_string(),
            }),
            None => Err(GeminiError::EmptyResponse),
        }
    }

    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let url = self.endpoint(model);
        debug!(%url, "sending generateContent request");

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "generateContent response");

        if !status.is_success() {
            let err = api_error(status.as_u16(), &body);
            warn!("gemini http {status}: {err}");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| GeminiError::Decode(e.to_string()))
    }
}

/// Build an error from a non-2xx body, keeping the service message when present.
pub fn api_error(status: u16, body: &str) -> GeminiError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Gemini API returned HTTP {status}"));
    GeminiError::Api { status, message }
}
