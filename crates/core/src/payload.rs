use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PayloadError;
use crate::validator::ValidatedConfig;

/// HTTP method the API performs against the target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Every supported method.
    pub const ALL: &'static [Self] = &[
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
    ];

    /// Returns the method name as an uppercase string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = PayloadError;

    /// Parses a method name, ignoring ASCII case. Surrounding whitespace is
    /// not stripped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|method| method.as_str() == upper)
            .ok_or_else(|| PayloadError::UnsupportedMethod {
                method: s.to_owned(),
                expected: Self::ALL
                    .iter()
                    .map(|method| method.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Request body sent to the scraping API.
///
/// Option fields are flattened in under their camel-case wire names.
/// `body` and `headers` are left out entirely when not supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub url: String,
    pub method: HttpMethod,

    #[serde(flatten)]
    pub options: ValidatedConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

/// Fluent construction of a [`Payload`] for one outbound request.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    url: String,
    method: String,
    body: Option<serde_json::Value>,
    headers: Option<HashMap<String, String>>,
}

impl PayloadBuilder {
    /// Start a payload for the given target URL and method name.
    ///
    /// Nothing is checked until [`build`](Self::build).
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            body: None,
            headers: None,
        }
    }

    /// Attach a request body, forwarded to the target unchanged.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add one request header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace all request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Check the URL and method and assemble the payload.
    ///
    /// The options are copied as-is; `config` is assumed to come from
    /// [`validate`](crate::validate) and is not checked again.
    pub fn build(self, config: &ValidatedConfig) -> Result<Payload, PayloadError> {
        if self.url.trim().is_empty() {
            return Err(PayloadError::EmptyUrl);
        }
        let method: HttpMethod = self.method.parse()?;

        debug!(
            url = %self.url,
            method = %method,
            has_body = self.body.is_some(),
            has_headers = self.headers.is_some(),
            "built scrape payload"
        );

        Ok(Payload {
            url: self.url,
            method,
            options: config.clone(),
            body: self.body,
            headers: self.headers,
        })
    }
}

/// Builds a payload in one call. See [`PayloadBuilder`].
pub fn build_payload(
    url: &str,
    method: &str,
    config: &ValidatedConfig,
    body: Option<serde_json::Value>,
    headers: Option<HashMap<String, String>>,
) -> Result<Payload, PayloadError> {
    let mut builder = PayloadBuilder::new(url, method);
    builder.body = body;
    builder.headers = headers;
    builder.build(config)
}
