use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target language of the generated deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    Uz,
    #[default]
    En,
    Ru,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Uz, Language::En, Language::Ru];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Uz => "UZ",
            Language::En => "EN",
            Language::Ru => "RU",
        }
    }

    /// Name of the language as written into the model prompt.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            Language::Uz => "Uzbek",
            Language::En => "English",
            Language::Ru => "Russian",
        }
    }

    /// Name shown in the language picker.
    pub fn display_label(&self) -> &'static str {
        match self {
            Language::Uz => "O'zbekcha",
            Language::En => "English",
            Language::Ru => "Русский",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Language::Uz => Language::En,
            Language::En => Language::Ru,
            Language::Ru => Language::Uz,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uz" => Ok(Language::Uz),
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            other => Err(format!("Invalid language '{other}'. Use: uz, en, ru")),
        }
    }
}

/// What kind of text the user supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Document,
    /// A video transcript, usually copied from YouTube.
    Youtube,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Document => "document",
            InputKind::Youtube => "youtube",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            InputKind::Document => "Document",
            InputKind::Youtube => "YouTube",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            InputKind::Document => "Paste Document content here...",
            InputKind::Youtube => "Paste YouTube Transcript here...",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            InputKind::Document => InputKind::Youtube,
            InputKind::Youtube => InputKind::Document,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "doc" => Ok(InputKind::Document),
            "youtube" | "transcript" => Ok(InputKind::Youtube),
            other => Err(format!(
                "Invalid input kind '{other}'. Use: document, youtube"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub bullets: Vec<String>,
}

/// A generated presentation. Received whole from the model and never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Everything the user has entered on the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionInput {
    pub text: String,
    pub language: Language,
    pub input_kind: InputKind,
    pub extended_reasoning: bool,
}

impl SessionInput {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_labels() {
        assert_eq!(Language::Ru.prompt_label(), "Russian");
        assert_eq!(Language::Uz.prompt_label(), "Uzbek");
        assert_eq!(Language::default(), Language::En);
        assert_eq!("ru".parse::<Language>(), Ok(Language::Ru));
        assert_eq!(" EN ".parse::<Language>(), Ok(Language::En));
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_cycle_visits_all() {
        let mut lang = Language::Uz;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(lang);
            lang = lang.next();
        }
        assert_eq!(seen, Language::ALL.to_vec());
        assert_eq!(lang, Language::Uz);
    }

    #[test]
    fn test_input_kind_parse_and_toggle() {
        assert_eq!("transcript".parse::<InputKind>(), Ok(InputKind::Youtube));
        assert_eq!("Document".parse::<InputKind>(), Ok(InputKind::Document));
        assert_eq!(InputKind::Document.toggled(), InputKind::Youtube);
        assert_eq!(InputKind::Youtube.placeholder(), "Paste YouTube Transcript here...");
    }

    #[test]
    fn test_session_input_defaults() {
        let input = SessionInput::default();
        assert!(input.is_blank());
        assert_eq!(input.language, Language::En);
        assert_eq!(input.input_kind, InputKind::Document);
        assert!(!input.extended_reasoning);
    }

    #[test]
    fn test_char_count_counts_scalars() {
        let input = SessionInput {
            text: "Привет".to_string(),
            ..Default::default()
        };
        assert_eq!(input.char_count(), 6);
    }

    #[test]
    fn test_deck_serde_shape() {
        let deck = Deck {
            title: "Rust".to_string(),
            slides: vec![Slide {
                title: "Intro".to_string(),
                bullets: vec!["Ownership".to_string()],
            }],
        };
        let value = serde_json::to_value(&deck).unwrap();
        assert_eq!(value["slides"][0]["bullets"][0], "Ownership");
        assert_eq!(serde_json::to_value(Language::Ru).unwrap(), "RU");
        assert_eq!(serde_json::to_value(InputKind::Youtube).unwrap(), "youtube");
    }
}
