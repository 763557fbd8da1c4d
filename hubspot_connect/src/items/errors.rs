use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemsError {
    /// The supplied credentials payload is unusable (not JSON, or no
    /// access token in it).
    #[error("Invalid credentials: {0}")]
    Credentials(String),

    /// HubSpot answered with a non-success status.
    #[error("Provider error ({status}): {detail}")]
    Provider { status: u16, detail: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
