//! Option validation and payload mapping for the AskPablos scraping API.
//!
//! Caller-supplied options arrive as a loosely-typed JSON map. They are
//! checked against a closed table of recognized options by [`validate`], and
//! the resulting [`ValidatedConfig`] is mapped onto the API's wire contract by
//! [`build_payload`] (or the fluent [`PayloadBuilder`]).
//!
//! # Quick start
//!
//! ```rust
//! use askpablos_core::{PayloadBuilder, validate};
//! use serde_json::json;
//!
//! let raw = json!({"browser": true, "js_strategy": "DEFAULT"});
//! let config = validate(raw.as_object().unwrap())?;
//!
//! let payload = PayloadBuilder::new("https://example.com", "get")
//!     .with_header("Accept-Language", "en")
//!     .build(&config)?;
//!
//! let wire = serde_json::to_value(&payload).unwrap();
//! assert_eq!(wire["method"], "GET");
//! assert_eq!(wire["jsStrategy"], "DEFAULT");
//! # Ok::<(), askpablos_core::Error>(())
//! ```

pub mod error;
pub mod options;
pub mod payload;
pub mod validator;

pub use error::{ConfigError, Error, PayloadError};
pub use options::{JsMode, JsStrategy, OPTIONS, OptionKind, OptionSpec, OptionValue};
pub use payload::{HttpMethod, Payload, PayloadBuilder, build_payload};
pub use validator::{RawConfig, ValidatedConfig, validate};
