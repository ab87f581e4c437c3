//! The closed table of recognized options.
//!
//! Adding an option means adding a row to [`OPTIONS`]; the validator and the
//! payload mapper both walk the table instead of naming keys directly.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::ConfigError;

/// Named JavaScript strategies accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsMode {
    /// The API's standard rendering strategy.
    Default,
}

impl JsMode {
    /// Every named mode, in the order they are listed in error messages.
    pub const ALL: &'static [Self] = &[Self::Default];

    /// Returns the wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
        }
    }

    /// Looks up a mode by its exact wire name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|mode| mode.as_str() == name)
    }
}

/// Tri-state JavaScript strategy: off, on (stealth), or a named mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JsStrategy {
    #[default]
    Off,
    On,
    Named(JsMode),
}

impl JsStrategy {
    /// Returns `true` for anything other than [`JsStrategy::Off`].
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl From<bool> for JsStrategy {
    fn from(enabled: bool) -> Self {
        if enabled { Self::On } else { Self::Off }
    }
}

impl From<JsMode> for JsStrategy {
    fn from(mode: JsMode) -> Self {
        Self::Named(mode)
    }
}

impl Serialize for JsStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Off => serializer.serialize_bool(false),
            Self::On => serializer.serialize_bool(true),
            Self::Named(mode) => serializer.serialize_str(mode.as_str()),
        }
    }
}

/// Semantic type of an option, with its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Plain boolean.
    Flag { default: bool },
    /// Boolean or one of the [`JsMode`] names.
    JsStrategy { default: JsStrategy },
}

/// A normalized option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue {
    Flag(bool),
    JsStrategy(JsStrategy),
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag(value) => serializer.serialize_bool(*value),
            Self::JsStrategy(strategy) => strategy.serialize(serializer),
        }
    }
}

/// One row of the option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Snake-case key used in caller configuration.
    pub key: &'static str,
    /// Camel-case field name in the outbound payload.
    pub wire_name: &'static str,
    pub kind: OptionKind,
    /// Only takes effect when the `browser` option is enabled.
    pub requires_browser: bool,
}

pub const BROWSER: &str = "browser";
pub const ROTATE_PROXY: &str = "rotate_proxy";
pub const WAIT_FOR_LOAD: &str = "wait_for_load";
pub const SCREENSHOT: &str = "screenshot";
pub const JS_STRATEGY: &str = "js_strategy";

/// Recognized options, in validation order.
pub const OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        key: BROWSER,
        wire_name: "browser",
        kind: OptionKind::Flag { default: false },
        requires_browser: false,
    },
    OptionSpec {
        key: ROTATE_PROXY,
        wire_name: "rotateProxy",
        kind: OptionKind::Flag { default: false },
        requires_browser: false,
    },
    OptionSpec {
        key: WAIT_FOR_LOAD,
        wire_name: "waitForLoad",
        kind: OptionKind::Flag { default: false },
        requires_browser: true,
    },
    OptionSpec {
        key: SCREENSHOT,
        wire_name: "screenshot",
        kind: OptionKind::Flag { default: false },
        requires_browser: true,
    },
    OptionSpec {
        key: JS_STRATEGY,
        wire_name: "jsStrategy",
        kind: OptionKind::JsStrategy {
            default: JsStrategy::Off,
        },
        requires_browser: true,
    },
];

/// Finds the table row for a configuration key.
pub fn lookup(key: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.key == key)
}

/// Comma-separated list of recognized keys, for error messages.
pub(crate) fn recognized_keys() -> String {
    OPTIONS
        .iter()
        .map(|spec| spec.key)
        .collect::<Vec<_>>()
        .join(", ")
}

impl OptionSpec {
    /// Value used when the key is absent from the caller's map.
    pub fn default_value(&self) -> OptionValue {
        match self.kind {
            OptionKind::Flag { default } => OptionValue::Flag(default),
            OptionKind::JsStrategy { default } => OptionValue::JsStrategy(default),
        }
    }

    /// Human-readable description of what the option accepts.
    pub fn expected(&self) -> String {
        match self.kind {
            OptionKind::Flag { .. } => "a boolean".to_owned(),
            OptionKind::JsStrategy { .. } => {
                let names = JsMode::ALL
                    .iter()
                    .map(|mode| format!("\"{}\"", mode.as_str()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("a boolean or one of {names}")
            }
        }
    }

    /// Normalizes an explicitly supplied value.
    ///
    /// A string is never read as a boolean, so `"true"` is rejected for a
    /// flag and only exact mode names are accepted for the JS strategy.
    pub fn parse(&self, value: &Value) -> Result<OptionValue, ConfigError> {
        match (self.kind, value) {
            (OptionKind::Flag { .. }, Value::Bool(b)) => Ok(OptionValue::Flag(*b)),
            (OptionKind::JsStrategy { .. }, Value::Bool(b)) => {
                Ok(OptionValue::JsStrategy(JsStrategy::from(*b)))
            }
            (OptionKind::JsStrategy { .. }, Value::String(name)) => JsMode::from_name(name)
                .map(|mode| OptionValue::JsStrategy(JsStrategy::Named(mode)))
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: self.key.to_owned(),
                    expected: self.expected(),
                    received: value.clone(),
                }),
            _ => Err(ConfigError::InvalidType {
                key: self.key.to_owned(),
                expected: self.expected(),
                received: value.clone(),
            }),
        }
    }
}
