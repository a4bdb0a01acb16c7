use std::fmt;
use thiserror::Error;

pub const FORMAT_ERROR_MESSAGE: &str =
    "The AI response was not in the expected format. Please try again.";
pub const SERVICE_ERROR_MESSAGE: &str = "Generation failed. Please try again later.";

/// Every failure the application surfaces to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// Submit was pressed with nothing but whitespace in the input
    #[error("Input content is empty. Please provide text or a transcript.")]
    Validation,

    /// Submit was pressed while a generation is still running
    #[error("A presentation is already being generated.")]
    Busy,

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    File(#[from] FileTypeError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Clipboard read failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Could not access clipboard. Please paste manually (Ctrl+V).")]
    NotSupported { reason: String },

    #[error("Clipboard access denied. Please allow permissions or paste manually.")]
    NotAllowed { reason: String },

    #[error("Clipboard is empty.")]
    Empty,
}

/// Rejections from the file loader
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileTypeError {
    #[error("Unsupported file type. Please use a .txt file or paste text.")]
    Unsupported { extension: Option<String> },

    #[error("Notice: Automated extraction for .{extension} is restricted. Please copy-paste the text content directly.")]
    ExtractionRestricted { extension: String },

    #[error("Could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Failures of a single generate call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The service answered, but not with a deck
    #[error("{}", FORMAT_ERROR_MESSAGE)]
    Format { reason: String },

    /// Transport or service fault, with the service message when it gave one
    #[error("{}", .message.as_deref().unwrap_or(SERVICE_ERROR_MESSAGE))]
    Service { message: Option<String> },
}

impl GenerationError {
    pub fn format(reason: impl Into<String>) -> Self {
        GenerationError::Format {
            reason: reason.into(),
        }
    }

    pub fn service(message: impl Into<String>) -> Self {
        let message = message.into();
        GenerationError::Service {
            message: if message.trim().is_empty() {
                None
            } else {
                Some(message)
            },
        }
    }
}

/// Error reporting utilities
pub struct ErrorReporter;

impl ErrorReporter {
    /// Format error for user display
    pub fn format_user_error(error: &DeckError) -> String {
        error.to_string()
    }

    /// Get error severity level
    pub fn get_severity(error: &DeckError) -> ErrorSeverity {
        match error {
            DeckError::File(FileTypeError::ExtractionRestricted { .. }) => ErrorSeverity::Info,
            DeckError::Validation | DeckError::Busy => ErrorSeverity::Warning,
            DeckError::Clipboard(ClipboardError::Empty) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "NOTICE"),
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
        }
    }
}
