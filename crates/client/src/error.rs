use thiserror::Error;

/// Errors returned by [`AskPablosClient`](crate::AskPablosClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the API key or request signature.
    #[error("authentication failed (HTTP {status}): {body}")]
    Authentication { status: u16, body: String },

    /// The API returned HTTP 429.
    #[error("rate limited by the scraping API")]
    RateLimited,

    /// The API returned a non-success status not covered above.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The payload could not be serialized for the request body.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The API answered 2xx but the reply could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// HMAC signature computation failed.
    #[error("HMAC signing error: {0}")]
    Signing(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Returns `true` if the failure is transient and the same request may
    /// succeed later. The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited => true,
            Self::UnexpectedStatus { status, .. } => (500..600).contains(status),
            Self::Authentication { .. }
            | Self::InvalidPayload(_)
            | Self::InvalidResponse(_)
            | Self::Signing(_)
            | Self::Configuration(_) => false,
        }
    }
}
