use thiserror::Error;

/// A caller-supplied option map was rejected.
///
/// Every variant names the offending key so the caller can fix the
/// configuration without reading the option table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The key is not one of the recognized options.
    #[error("unknown option '{key}' = {received} (expected one of: {expected})")]
    UnknownKey {
        key: String,
        expected: String,
        received: serde_json::Value,
    },

    /// The key is recognized but its value has the wrong JSON type.
    #[error("option '{key}' must be {expected}, got {received}")]
    InvalidType {
        key: String,
        expected: String,
        received: serde_json::Value,
    },

    /// The key has the right type but a value outside the allowed set.
    #[error("option '{key}' must be {expected}, got {received}")]
    InvalidValue {
        key: String,
        expected: String,
        received: serde_json::Value,
    },
}

impl ConfigError {
    /// The option key the error refers to.
    pub fn key(&self) -> &str {
        match self {
            Self::UnknownKey { key, .. }
            | Self::InvalidType { key, .. }
            | Self::InvalidValue { key, .. } => key,
        }
    }
}

/// The URL or method handed to the payload builder was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The target URL was empty or whitespace.
    #[error("url must be a non-empty string")]
    EmptyUrl,

    /// The HTTP method is not one the API accepts.
    #[error("unsupported method '{method}' (expected one of: {expected})")]
    UnsupportedMethod { method: String, expected: String },
}

/// Umbrella error for callers that validate and build in one pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid payload: {0}")]
    Payload(#[from] PayloadError),
}
