//! Error types for cmc-citations
//!
//! Resolution and formatting never fail. Errors only come from the edges:
//! reading files, parsing stored documents, and loading settings.

use thiserror::Error;

/// Result type alias for cmc-citations operations
pub type Result<T> = std::result::Result<T, CitationsError>;

#[derive(Error, Debug)]
pub enum CitationsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document JSON is malformed or missing a required field
    #[error("Document parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] toml::de::Error),

    #[error("Settings write error: {0}")]
    SettingsWrite(#[from] toml::ser::Error),
}
