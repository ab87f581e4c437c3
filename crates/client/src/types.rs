use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Reply body returned by the scraping API on success.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ApiReply {
    /// Status the target site answered with.
    pub status_code: Option<u16>,
    pub response_body: String,
    pub headers: HashMap<String, String>,
    /// Base64-encoded PNG, present when a screenshot was requested.
    pub screenshot: Option<String>,
}

/// The scraped page, as reported by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeResponse {
    /// Status code of the target page (falls back to the API's own status
    /// when the reply omits it).
    pub status_code: u16,

    /// Page content.
    pub body: String,

    /// Response headers of the target page.
    pub headers: HashMap<String, String>,

    /// Decoded screenshot bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<Vec<u8>>,
}

impl ScrapeResponse {
    pub(crate) fn from_reply(reply: ApiReply, api_status: u16) -> Result<Self, ClientError> {
        let screenshot = reply
            .screenshot
            .filter(|encoded| !encoded.is_empty())
            .map(|encoded| {
                STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(|e| ClientError::InvalidResponse(format!("bad screenshot: {e}")))
            })
            .transpose()?;

        Ok(Self {
            status_code: reply.status_code.unwrap_or(api_status),
            body: reply.response_body,
            headers: reply.headers,
            screenshot,
        })
    }
}
