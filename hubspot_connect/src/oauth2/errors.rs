use crate::storage::StorageError;
use crate::utils::UtilError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OAuth2Error {
    /// The state parameter could not be decoded or parsed at all.
    #[error("Invalid state parameter: {0}")]
    MalformedState(String),

    /// The state parameter decoded cleanly but a required field is absent.
    #[error("Incomplete state data: missing {0}")]
    IncompleteState(&'static str),

    #[error("State not found in cache or has expired")]
    StateExpiredOrMissing,

    /// Cached state and the value echoed back by the provider differ.
    /// Treated as a potential CSRF attempt.
    #[error("State mismatch, possible CSRF attempt")]
    StateMismatch,

    #[error("No credentials found")]
    NoCredentials,

    /// The provider reported an error or returned a non-success status.
    #[error("Provider error ({status}): {detail}")]
    Provider { status: u16, detail: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl From<StorageError> for OAuth2Error {
    fn from(e: StorageError) -> Self {
        OAuth2Error::Storage(e.to_string())
    }
}
