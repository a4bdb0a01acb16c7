//! Core library: prompt construction, the generation client, input sources
//! and the application state shared by the front ends.

pub mod client;
pub mod clipboard;
pub mod controller;
pub mod error;
pub mod export;
pub mod generation;
pub mod input_file;
pub mod model_info;
pub mod prompt;
pub mod viewer;

#[cfg(test)]
mod test_support;

pub use controller::{AppState, GenerationJob};
pub use error::{DeckError, ErrorReporter, ErrorSeverity, GenerationError};
pub use generation::Generator;
pub use viewer::SlideViewer;
