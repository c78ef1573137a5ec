//! Error types for route-overlay crates.

use thiserror::Error;

/// Result type alias using OverlayError.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Primary error type for loading, projecting and rendering.
#[derive(Debug, Error)]
pub enum OverlayError {
    // === Input Errors ===
    #[error("Invalid grid descriptor: {0}")]
    InvalidGrid(String),

    #[error("Grid matrix shape mismatch: expected {expected} values, got {actual}")]
    GridShape { expected: usize, actual: usize },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OverlayError {
    /// Create a Parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Whether the error was caused by malformed input data rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            OverlayError::InvalidGrid(_)
                | OverlayError::GridShape { .. }
                | OverlayError::Parse { .. }
                | OverlayError::InvalidRoute(_)
                | OverlayError::Json(_)
        )
    }
}
