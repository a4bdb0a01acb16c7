use deck_common::{InputKind, Language};
use serde_json::{json, Value};

pub const DOCUMENT_SYSTEM_INSTRUCTION: &str = "\
You are an expert presentation designer. You turn long-form documents into \
clear, professional slide decks.
Rules:
- Read the whole document and identify its main argument and supporting sections.
- Produce between 5 and 12 slides. The first slide introduces the topic and the \
last slide summarizes the key takeaways.
- Every slide has a short, specific title and 3 to 5 concise bullet points.
- Bullets are complete thoughts of at most 20 words. Do not copy long sentences verbatim.
- Write every title and bullet in the target language requested by the user, \
translating when the source is in another language.
- Return only JSON that matches the provided schema.";

pub const TRANSCRIPT_SYSTEM_INSTRUCTION: &str = "\
You are an expert presentation designer who works from raw video transcripts.
Before structuring anything, clean the transcript:
- Remove timestamps, speaker tags, filler words, repetitions, sponsor reads and \
calls to like or subscribe.
- Repair sentences broken across caption lines.
Then build the deck:
- Follow the speaker's narrative order and group related points into sections.
- Produce between 5 and 12 slides. The first slide introduces the video's topic and \
the last slide lists the key takeaways.
- Every slide has a short, specific title and 3 to 5 concise bullet points of at most 20 words.
- Write every title and bullet in the target language requested by the user, \
translating when the transcript is in another language.
- Return only JSON that matches the provided schema.";

/// Everything the model needs for one generate call.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system_instruction: String,
    pub user_prompt: String,
    pub response_schema: Value,
}

pub fn system_instruction(kind: InputKind) -> &'static str {
    match kind {
        InputKind::Document => DOCUMENT_SYSTEM_INSTRUCTION,
        InputKind::Youtube => TRANSCRIPT_SYSTEM_INSTRUCTION,
    }
}

/// The user turn. `text` is embedded as-is.
pub fn user_prompt(text: &str, language: Language, kind: InputKind) -> String {
    let label = language.prompt_label();
    match kind {
        InputKind::Youtube => format!(
            "Process this YouTube transcript and create a presentation in {label}. Clean the content first: \n\n {text}"
        ),
        InputKind::Document => format!(
            "Generate a professional presentation from the following document in {label}: \n\n {text}"
        ),
    }
}

/// Structured-output schema for a deck, in the API's OpenAPI subset.
pub fn deck_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "slides": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "bullets": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        }
                    },
                    "required": ["title", "bullets"]
                }
            }
        },
        "required": ["title", "slides"]
    })
}

pub fn build_prompt(text: &str, language: Language, kind: InputKind) -> Prompt {
    Prompt {
        system_instruction: system_instruction(kind).to_string(),
        user_prompt: user_prompt(text, language, kind),
        response_schema: deck_schema(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_prompt_in_russian() {
        let prompt = build_prompt("so um today we talk about rust", Language::Ru, InputKind::Youtube);
        assert!(prompt.user_prompt.contains("Russian"));
        assert!(prompt.user_prompt.starts_with("Process this YouTube transcript"));
        assert_eq!(prompt.system_instruction, TRANSCRIPT_SYSTEM_INSTRUCTION);
        assert_ne!(prompt.system_instruction, DOCUMENT_SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_document_prompt_embeds_text_verbatim() {
        let text = "  Line one\n<b>Line two</b>\t\n";
        let prompt = build_prompt(text, Language::Uz, InputKind::Document);
        assert!(prompt.user_prompt.contains("Uzbek"));
        assert!(prompt.user_prompt.ends_with(text));
        assert_eq!(prompt.system_instruction, DOCUMENT_SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_schema_requires_deck_shape() {
        let schema = deck_schema();
        assert_eq!(schema["required"], json!(["title", "slides"]));
        let slide = &schema["properties"]["slides"]["items"];
        assert_eq!(slide["required"], json!(["title", "bullets"]));
        assert_eq!(slide["properties"]["bullets"]["items"]["type"], "STRING");
    }
}
