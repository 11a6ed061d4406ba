//! Error types for internationalization operations

use epicvpn_common::SiteError;
use thiserror::Error;

/// Errors that can occur while building the translation table or touching
/// durable storage. The engine itself never surfaces these to callers.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// Failed to load a resource file
    #[error("Failed to load resource file: {path}")]
    ResourceLoad { path: String },

    /// A resource file is not valid JSON
    #[error("Failed to parse resource '{path}': {source}")]
    ResourceParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A resource parsed but holds something other than strings
    #[error("Invalid entry '{key}' in resource '{path}': expected a string")]
    InvalidEntry { path: String, key: String },

    /// Durable storage is unavailable or rejected the operation
    #[error("Storage unavailable: {message}")]
    Storage { message: String },

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl I18nError {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

impl From<I18nError> for SiteError {
    fn from(err: I18nError) -> Self {
        match err {
            I18nError::Storage { message } => SiteError::storage(message),
            I18nError::IoError(io) => SiteError::Io(io),
            other => SiteError::localization_with_source("Localization failure", other),
        }
    }
}
