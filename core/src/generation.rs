use crate::client::{GeminiBackend, GenerationRequest, ModelBackend};
use crate::error::GenerationError;
use crate::model_info::ModelCatalog;
use crate::prompt::build_prompt;
use deck_common::{Deck, DeckConfig, InputKind, Language, SessionInput};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns session input into a validated deck with one model call.
#[derive(Clone)]
pub struct Generator {
    backend: Arc<dyn ModelBackend + Send + Sync>,
    catalog: ModelCatalog,
}

impl Generator {
    pub fn new(backend: Arc<dyn ModelBackend + Send + Sync>, catalog: ModelCatalog) -> Self {
        Self { backend, catalog }
    }

    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(
            Arc::new(GeminiBackend::from_config(config)),
            ModelCatalog::from_config(config),
        )
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn build_request(
        &self,
        text: &str,
        language: Language,
        input_kind: InputKind,
        extended_reasoning: bool,
    ) -> GenerationRequest {
        let selection = self.catalog.select(extended_reasoning);
        GenerationRequest {
            model: selection.model,
            prompt: build_prompt(text, language, input_kind),
            thinking_budget: selection.thinking_budget,
        }
    }

    pub async fn generate(
        &self,
        text: &str,
        language: Language,
        input_kind: InputKind,
        extended_reasoning: bool,
    ) -> Result<Deck, GenerationError> {
        let request = self.build_request(text, language, input_kind, extended_reasoning);
        info!(
            model = %request.model,
            language = %language,
            input_kind = %input_kind,
            thinking_budget = ?request.thinking_budget,
            chars = text.chars().count(),
            "generating deck"
        );

        let raw = self.backend.complete(&request).await.map_err(|e| {
            warn!("generation failed: {e}");
            e
        })?;

        match parse_deck(&raw) {
            Ok(deck) => {
                info!(slides = deck.len(), "deck generated");
                Ok(deck)
            }
            Err(e) => {
                if let GenerationError::Format { reason } = &e {
                    warn!(%reason, "model response rejected");
                }
                debug!(raw = %raw, "rejected model response");
                Err(e)
            }
        }
    }

    pub async fn generate_for(&self, input: &SessionInput) -> Result<Deck, GenerationError> {
        self.generate(
            &input.text,
            input.language,
            input.input_kind,
            input.extended_reasoning,
        )
        .await
    }
}

/// Validate the model's answer against the deck schema.
///
/// Unknown fields are ignored. A deck without slides is rejected since the
/// viewer always needs a current slide.
pub fn parse_deck(raw: &str) -> Result<Deck, GenerationError> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(GenerationError::format("empty response text"));
    }
    let deck: Deck = serde_json::from_str(body).map_err(|e| GenerationError::format(e.to_string()))?;
    if deck.slides.is_empty() {
        return Err(GenerationError::format("deck has no slides"));
    }
    Ok(deck)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
