use askpablos_core::Payload;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use reqwest::{Client, StatusCode};
use sha2::Sha256;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::types::{ApiReply, ScrapeResponse};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Header carrying the base64 HMAC-SHA256 signature of the request body.
pub const SIGNATURE_HEADER: &str = "X-Signature";

/// Client that posts signed payloads to the scraping API.
pub struct AskPablosClient {
    config: ClientConfig,
    client: Client,
}

impl AskPablosClient {
    /// Create a client with the given configuration.
    ///
    /// The underlying HTTP client uses the configured timeout and keeps no
    /// idle connections between calls.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { config, client })
    }

    /// Create a client around a caller-supplied `reqwest::Client`.
    pub fn with_client(config: ClientConfig, client: Client) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Compute the base64-encoded HMAC-SHA256 signature of the request body.
    pub(crate) fn sign(secret: &str, body: &[u8]) -> Result<String, ClientError> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| ClientError::Signing(format!("invalid HMAC key: {e}")))?;
        mac.update(body);
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// Send one payload to the API and decode the scraped page.
    ///
    /// The payload is serialized once; those exact bytes are both signed and
    /// sent.
    #[instrument(skip(self, payload), fields(url = %payload.url, method = %payload.method))]
    pub async fn fetch(&self, payload: &Payload) -> Result<ScrapeResponse, ClientError> {
        let body_bytes =
            serde_json::to_vec(payload).map_err(|e| ClientError::InvalidPayload(e.to_string()))?;
        let signature = Self::sign(&self.config.secret_key, &body_bytes)?;

        debug!(
            api_url = %self.config.api_url,
            bytes = body_bytes.len(),
            "sending scrape request"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Content-Type", "application/json")
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(SIGNATURE_HEADER, signature)
            .body(body_bytes)
            .send()
            .await
            .inspect_err(|e| {
                if e.is_timeout() {
                    warn!("scrape request timed out");
                }
            })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("scraping API returned 429");
            return Err(ClientError::RateLimited);
        }

        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), "scraping API rejected credentials");
            return Err(ClientError::Authentication {
                status: status.as_u16(),
                body: text,
            });
        }

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let reply: ApiReply = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("malformed reply: {e}")))?;
        let scraped = ScrapeResponse::from_reply(reply, status.as_u16())?;

        debug!(
            status_code = scraped.status_code,
            bytes = scraped.body.len(),
            screenshot = scraped.screenshot.is_some(),
            "scrape request completed"
        );

        Ok(scraped)
    }
}
