//! Errors raised while talking to the backend

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Search failed: {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid backend URL {url}: {reason}")]
    InvalidBackend { url: String, reason: String },
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the backend answered at all
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }
}
