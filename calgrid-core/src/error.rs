//! Error types for calgrid.

use thiserror::Error;

/// Errors that can occur while loading a config or rendering a calendar.
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("Could not parse config file: {0}")]
    ConfigParse(String),

    #[error("Invalid config:\n{0}")]
    ConfigValidation(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
