use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use deck_common::{DeckConfig, InputKind, Language, SessionInput};
use deck_core::export::ExportHelper;
use deck_core::{AppState, Generator};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "deck")]
#[command(about = "Turn documents and video transcripts into slide decks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the fast model (e.g., gemini-3-flash-preview)
    #[arg(long)]
    pub model_flash: Option<String>,

    /// Override the extended-reasoning model (e.g., gemini-3-pro-preview)
    #[arg(long)]
    pub model_pro: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive form and slide viewer
    Interactive,
    /// Generate a deck and print it as JSON
    Generate {
        /// Plain-text input file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Deck language: uz, en, ru
        #[arg(short, long)]
        language: Option<Language>,
        /// Input kind: document, youtube
        #[arg(short, long, default_value = "document")]
        kind: InputKind,
        /// Use the extended-reasoning model
        #[arg(long)]
        thinking: bool,
    },
    /// Print the python-pptx export template and API schema
    ExportHelper,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli).await?;

    match cli.command {
        Some(Commands::ExportHelper) => {
            print!("{}", ExportHelper::new().render_text());
        }
        Some(Commands::Generate {
            file,
            language,
            kind,
            thinking,
        }) => {
            init_logging(&config, cli.debug)?;
            let input = SessionInput {
                text: String::new(),
                language: language.unwrap_or(config.default_language),
                input_kind: kind,
                extended_reasoning: thinking,
            };
            generate_deck(&config, input, file.as_deref()).await?;
        }
        Some(Commands::Interactive) | None => {
            init_logging(&config, cli.debug)?;
            deck_tui::run_interactive(&config).await?;
        }
    }

    Ok(())
}

pub async fn load_config(cli: &Cli) -> Result<DeckConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = DeckConfig::load_from(path).await?;
            config.apply_env_credential(|name| std::env::var(name).ok());
            config
        }
        None => DeckConfig::load().await?,
    };
    if let Some(model) = &cli.model_flash {
        config.flash_model = model.clone();
    }
    if let Some(model) = &cli.model_pro {
        config.pro_model = model.clone();
    }
    Ok(config)
}

/// Log to a file: the terminal belongs to the TUI.
fn init_logging(config: &DeckConfig, debug: bool) -> Result<()> {
    let path = config.log_path();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {e}"))
}

async fn generate_deck(
    config: &DeckConfig,
    input: SessionInput,
    file: Option<&Path>,
) -> Result<()> {
    let mut state = AppState::with_defaults(input);

    match file {
        Some(path) => {
            state.load_file(path).await;
            if let Some(message) = state.error_message() {
                return Err(anyhow!(message));
            }
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read input from stdin")?;
            state.set_text(text);
        }
    }

    info!(chars = state.input().char_count(), "Generating deck from the command line");
    let generator = Generator::from_config(config);
    eprintln!("Synthesizing...");
    state
        .submit(&generator)
        .await
        .map_err(|e| anyhow!(e.to_string()))?;

    let deck = state
        .deck()
        .ok_or_else(|| anyhow!("Generation finished without a deck"))?;
    println!("{}", serde_json::to_string_pretty(deck)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "deck", "generate", "notes.txt", "--language", "ru", "--kind", "youtube", "--thinking",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Generate {
                file,
                language,
                kind,
                thinking,
            }) => {
                assert_eq!(file, Some(PathBuf::from("notes.txt")));
                assert_eq!(language, Some(Language::Ru));
                assert_eq!(kind, InputKind::Youtube);
                assert!(thinking);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_defaults_to_interactive() {
        let cli = Cli::try_parse_from(["deck", "--debug"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.debug);
    }

    #[test]
    fn test_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["deck", "generate", "--language", "fr"]).is_err());
    }

    #[tokio::test]
    async fn test_model_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "{}").await.unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let cli = Cli::try_parse_from([
            "deck",
            "--config",
            path_arg.as_str(),
            "--model-pro",
            "gemini-custom-pro",
        ])
        .unwrap();
        let config = load_config(&cli).await.unwrap();
        assert_eq!(config.pro_model, "gemini-custom-pro");
        assert_eq!(config.flash_model, deck_common::DEFAULT_FLASH_MODEL);
    }
}
