//! HTTP client for the AskPablos scraping API.
//!
//! Takes a [`Payload`](askpablos_core::Payload) produced by `askpablos-core`,
//! signs it with the caller's secret, and posts it to the API. The client
//! performs exactly one request per call: it never retries, keeps no idle
//! pooled connections, and caches nothing. Use
//! [`ClientError::is_retryable`] to decide whether to try again.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use askpablos_client::{AskPablosClient, ClientConfig};
//! use askpablos_core::{PayloadBuilder, validate};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("my-api-key", "my-secret").with_timeout_secs(60);
//! let client = AskPablosClient::new(config)?;
//!
//! let raw = serde_json::json!({"browser": true, "screenshot": true});
//! let options = validate(raw.as_object().unwrap())?;
//! let payload = PayloadBuilder::new("https://example.com", "GET").build(&options)?;
//!
//! let response = client.fetch(&payload).await?;
//! println!("{} bytes of HTML", response.body.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::AskPablosClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use types::ScrapeResponse;
