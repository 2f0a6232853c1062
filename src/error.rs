use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, RecipeError>;

/// Errors that can occur while building or parsing recipe data
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Malformed construction input (zero denominator, non-integer quantity, overflow)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Text did not match the expected grammar
    #[error("Parse error: {0}")]
    Parse(String),

    /// Document does not validate against the recipe schema
    #[error("Document does not match the recipe schema: {0}")]
    Schema(String),

    /// Malformed JSON text
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RecipeError {
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        RecipeError::Parse(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RecipeError::InvalidArgument(msg.into())
    }
}
