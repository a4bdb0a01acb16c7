use crate::error::GenerationError;
use crate::prompt::Prompt;
use async_trait::async_trait;
use deck_common::DeckConfig;
use deck_gemini::{GeminiClient, GeminiError, GenerateContentRequest};

/// One fully resolved request to the model service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: Prompt,
    pub thinking_budget: Option<u32>,
}

/// Seam between the generator and the remote service. Implementations send
/// exactly one request and return the raw answer text.
#[async_trait]
pub trait ModelBackend {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// Adapter to wrap GeminiClient into ModelBackend
pub struct GeminiBackend {
    inner: GeminiClient,
}

impl GeminiBackend {
    pub fn new(inner: GeminiClient) -> Self {
        Self { inner }
    }

    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(GeminiClient::new(config.api_key.clone()).with_base_url(&config.api_base_url))
    }
}

pub fn to_gemini_request(request: &GenerationRequest) -> GenerateContentRequest {
    let prompt = &request.prompt;
    let wire = GenerateContentRequest::structured(
        &prompt.system_instruction,
        &prompt.user_prompt,
        prompt.response_schema.clone(),
    );
    match request.thinking_budget {
        Some(budget) => wire.with_thinking_budget(budget),
        None => wire,
    }
}

impl From<GeminiError> for GenerationError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Decode(reason) => GenerationError::format(reason),
            GeminiError::EmptyResponse => GenerationError::format("empty response"),
            other => GenerationError::service(other.to_string()),
        }
    }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let wire = to_gemini_request(request);
        let text = self.inner.generate_text(&request.model, &wire).await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::build_prompt;
    use deck_common::{InputKind, Language};

    fn request(thinking_budget: Option<u32>) -> GenerationRequest {
        GenerationRequest {
            model: "gemini-3-pro-preview".to_string(),
            prompt: build_prompt("text", Language::En, InputKind::Document),
            thinking_budget,
        }
    }

    #[test]
    fn test_wire_request_carries_prompt_and_budget() {
        let value = serde_json::to_value(to_gemini_request(&request(Some(32768)))).unwrap();
        assert_eq!(
            value["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            32768
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!(value["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .ends_with("text"));
    }

    #[test]
    fn test_wire_request_without_budget() {
        let value = serde_json::to_value(to_gemini_request(&request(None))).unwrap();
        assert!(value["generationConfig"].get("thinkingConfig").is_none());
    }

    #[test]
    fn test_gemini_error_mapping() {
        let err: GenerationError = GeminiError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Resource has been exhausted");

        let err: GenerationError = GeminiError::Decode("eof".to_string()).into();
        assert!(matches!(err, GenerationError::Format { .. }));

        let err: GenerationError = GeminiError::MissingApiKey.into();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
