pub mod app;
pub mod interactive;
pub mod render;

use anyhow::Result;
use deck_common::{DeckConfig, SessionInput};
use deck_core::Generator;

pub use app::*;
pub use interactive::*;

/// Run the interactive form and slide viewer
pub async fn run_interactive(config: &DeckConfig) -> Result<()> {
    let defaults = SessionInput {
        language: config.default_language,
        ..Default::default()
    };
    let mut app = InteractiveApp::new(Generator::from_config(config), defaults);
    app.run().await
}
