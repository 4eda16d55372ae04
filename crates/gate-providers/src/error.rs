//! Error types for provider clients.

/// Errors that can occur while talking to a cloud provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider rejected the supplied credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The provider answered with a non-success status.
    #[error("provider returned {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("failed to decode provider response: {0}")]
    Decode(String),

    /// The requested resource does not exist.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The client settings are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ProviderError {
    /// Creates an HTTP status error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
