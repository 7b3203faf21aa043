//! Error types for the harvester
//!
//! Normalization never produces an error: malformed feed values yield the
//! documented default for the field plus a warn-level diagnostic. Only
//! infrastructure failures (feed transport, rendering I/O, uploads, database)
//! surface as `AppError`.

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("OAI-PMH error [{code}]: {message}")]
    Oai { code: String, message: String },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Build an OAI protocol error from the `<error>` element of a response
    pub fn oai(code: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Oai {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
