//! Error types for the dropbox_download crate.

use thiserror::Error;

/// Errors that can occur when listing or downloading a shared Dropbox folder.
#[derive(Error, Debug)]
pub enum DropboxError {
    #[error("Missing access token")]
    MissingToken,

    #[error("Invalid shared link: {0}")]
    InvalidSharedLink(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid entry name: {0:?}")]
    InvalidEntryName(String),

    #[error("Listing reported more pages but returned no cursor")]
    MissingCursor,
}

impl DropboxError {
    /// HTTP status of an API failure, if this error is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            DropboxError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for DropboxError.
pub type Result<T> = std::result::Result<T, DropboxError>;
