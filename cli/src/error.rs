//! Error types for staybook-cli.
//!
//! Provides user-friendly error messages and context for common CLI
//! failures.

use staybook_link::ApiError;
use std::fmt;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug)]
pub enum CliError {
    /// Error from the staybook-link library
    Api(ApiError),

    /// Configuration file error
    Configuration(String),

    /// File I/O error
    File(String),

    /// Invalid command syntax
    Parse(String),

    /// User cancelled operation
    Cancelled,

    /// Readline error
    Readline(String),

    /// Output formatting error
    Format(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Api(e) => write!(f, "{}", e.user_message()),
            CliError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            CliError::File(msg) => write!(f, "File error: {}", msg),
            CliError::Parse(msg) => write!(f, "Parse error: {}", msg),
            CliError::Cancelled => write!(f, "Operation cancelled"),
            CliError::Readline(msg) => write!(f, "Input error: {}", msg),
            CliError::Format(msg) => write!(f, "Format error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// The underlying API error, when there is one
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            CliError::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        CliError::Api(err)
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        match err {
            rustyline::error::ReadlineError::Interrupted => CliError::Cancelled,
            rustyline::error::ReadlineError::Eof => CliError::Cancelled,
            e => CliError::Readline(e.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::File(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Configuration(format!("TOML parse error: {}", err))
    }
}
