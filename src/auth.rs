//! Bearer token handling for the Dropbox API.

use std::fmt;

use crate::error::{DropboxError, Result};

/// A Dropbox API access token.
///
/// Tokens are short-lived and issued outside this tool; there is no refresh.
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a token, trimming surrounding whitespace.
    pub fn new(token: impl AsRef<str>) -> Result<Self> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DropboxError::MissingToken);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
