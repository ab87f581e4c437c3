use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::options::{
    self, BROWSER, JS_STRATEGY, JsStrategy, OPTIONS, OptionSpec, OptionValue, ROTATE_PROXY,
    SCREENSHOT, WAIT_FOR_LOAD,
};

/// Loosely-typed caller configuration, keyed by snake-case option name.
pub type RawConfig = serde_json::Map<String, serde_json::Value>;

/// Fully populated, normalized options.
///
/// Holds exactly one value per row of [`OPTIONS`], in table order. Only
/// [`validate`] and [`Default`] produce one, so a `ValidatedConfig` never
/// carries an unknown key or an out-of-range value.
///
/// Re-validating is not supported: the output is keyed for the wire (and
/// serializes with camel-case names), which the snake-case validator would
/// reject as unknown keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    values: Vec<OptionValue>,
}

impl Default for ValidatedConfig {
    /// Every option at its documented default.
    fn default() -> Self {
        Self {
            values: OPTIONS.iter().map(OptionSpec::default_value).collect(),
        }
    }
}

impl ValidatedConfig {
    /// Returns the normalized value for a configuration key.
    pub fn get(&self, key: &str) -> Option<OptionValue> {
        OPTIONS
            .iter()
            .position(|spec| spec.key == key)
            .and_then(|index| self.values.get(index).copied())
    }

    /// Iterates over `(option, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static OptionSpec, OptionValue)> + '_ {
        OPTIONS.iter().zip(self.values.iter().copied())
    }

    fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(OptionValue::Flag(true)))
    }

    pub fn browser(&self) -> bool {
        self.flag(BROWSER)
    }

    pub fn rotate_proxy(&self) -> bool {
        self.flag(ROTATE_PROXY)
    }

    pub fn wait_for_load(&self) -> bool {
        self.flag(WAIT_FOR_LOAD)
    }

    pub fn screenshot(&self) -> bool {
        self.flag(SCREENSHOT)
    }

    pub fn js_strategy(&self) -> JsStrategy {
        match self.get(JS_STRATEGY) {
            Some(OptionValue::JsStrategy(strategy)) => strategy,
            _ => JsStrategy::Off,
        }
    }

    /// Browser-only options that are enabled while `browser` is off.
    pub fn ineffective_options(&self) -> Vec<&'static str> {
        if self.browser() {
            return Vec::new();
        }
        self.iter()
            .filter(|(spec, value)| spec.requires_browser && is_enabled(*value))
            .map(|(spec, _)| spec.key)
            .collect()
    }
}

fn is_enabled(value: OptionValue) -> bool {
    match value {
        OptionValue::Flag(b) => b,
        OptionValue::JsStrategy(strategy) => strategy.is_enabled(),
    }
}

impl Serialize for ValidatedConfig {
    /// Serializes as a map keyed by wire names.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (spec, value) in self.iter() {
            map.serialize_entry(spec.wire_name, &value)?;
        }
        map.end()
    }
}

/// Validates caller options against the option table.
///
/// Unknown keys are rejected before any value is inspected. Recognized keys
/// are then checked in table order, so the first violation reported is
/// deterministic. Absent keys take their default; a present value of the
/// wrong type (including `null`) is an error. The input is never modified.
pub fn validate(raw: &RawConfig) -> Result<ValidatedConfig, ConfigError> {
    let mut unknown: Vec<&String> = raw
        .keys()
        .filter(|key| options::lookup(key).is_none())
        .collect();
    unknown.sort();
    if let Some(key) = unknown.first() {
        return Err(ConfigError::UnknownKey {
            key: (*key).clone(),
            expected: options::recognized_keys(),
            received: raw[key.as_str()].clone(),
        });
    }

    let values = OPTIONS
        .iter()
        .map(|spec| match raw.get(spec.key) {
            Some(value) => spec.parse(value),
            None => Ok(spec.default_value()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let config = ValidatedConfig { values };

    let ineffective = config.ineffective_options();
    if !ineffective.is_empty() {
        warn!(
            options = ?ineffective,
            "browser-only options are enabled without browser rendering"
        );
    }
    debug!(
        supplied = raw.len(),
        js_strategy = ?config.js_strategy(),
        "validated scrape options"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::options::JsMode;

    fn raw(value: Value) -> RawConfig {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    fn single(key: &str, value: Value) -> RawConfig {
        let mut map = RawConfig::new();
        map.insert(key.to_owned(), value);
        map
    }

    const FLAGS: &[&str] = &[BROWSER, ROTATE_PROXY, WAIT_FOR_LOAD, SCREENSHOT];

    #[test]
    fn empty_config_yields_defaults() {
        let config = validate(&RawConfig::new()).unwrap();
        assert_eq!(config, ValidatedConfig::default());
        assert!(!config.browser());
        assert!(!config.rotate_proxy());
        assert!(!config.wait_for_load());
        assert!(!config.screenshot());
        assert_eq!(config.js_strategy(), JsStrategy::Off);
        assert_eq!(config.iter().count(), OPTIONS.len());
    }

    #[test]
    fn boolean_flags_preserve_value() {
        for key in FLAGS {
            for value in [true, false] {
                let config = validate(&single(key, json!(value))).unwrap();
                assert_eq!(config.get(key), Some(OptionValue::Flag(value)), "{key}");
            }
        }
    }

    #[test]
    fn boolean_flags_reject_strings() {
        for key in FLAGS {
            let err = validate(&single(key, json!("true"))).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidType { .. }), "{key}");
            assert_eq!(err.key(), *key);
        }
    }

    #[test]
    fn boolean_flags_reject_numbers_and_null() {
        let err = validate(&raw(json!({"browser": 1}))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidType { .. }));

        let err = validate(&raw(json!({"rotate_proxy": null}))).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidType {
                key: "rotate_proxy".into(),
                expected: "a boolean".into(),
                received: Value::Null,
            }
        );
    }

    #[test]
    fn js_strategy_accepts_booleans_and_named_modes() {
        let on = validate(&raw(json!({"js_strategy": true}))).unwrap();
        assert_eq!(on.js_strategy(), JsStrategy::On);

        let off = validate(&raw(json!({"js_strategy": false}))).unwrap();
        assert_eq!(off.js_strategy(), JsStrategy::Off);

        let named = validate(&raw(json!({"js_strategy": "DEFAULT"}))).unwrap();
        assert_eq!(named.js_strategy(), JsStrategy::Named(JsMode::Default));
    }

    #[test]
    fn js_strategy_rejects_unknown_mode() {
        let err = validate(&raw(json!({"js_strategy": "BOGUS"}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "option 'js_strategy' must be a boolean or one of \"DEFAULT\", got \"BOGUS\""
        );
    }

    #[test]
    fn js_strategy_is_case_sensitive() {
        for name in ["default", "Default", " DEFAULT"] {
            let err = validate(&raw(json!({"js_strategy": name}))).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }), "{name}");
        }
    }

    #[test]
    fn js_strategy_rejects_other_types() {
        for value in [json!(123), json!(["DEFAULT"]), json!({"mode": "DEFAULT"})] {
            let err = validate(&raw(json!({"js_strategy": value}))).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidType { .. }));
        }
    }

    #[test]
    fn truthy_string_is_not_a_boolean_strategy() {
        let err = validate(&raw(json!({"js_strategy": "true"}))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn unknown_key_rejected_regardless_of_value() {
        for value in [json!(true), json!("x"), json!(null), json!(1)] {
            let err = validate(&raw(json!({"unknown_key": value.clone()}))).unwrap_err();
            assert_eq!(
                err,
                ConfigError::UnknownKey {
                    key: "unknown_key".into(),
                    expected: "browser, rotate_proxy, wait_for_load, screenshot, js_strategy"
                        .into(),
                    received: value.clone(),
                }
            );
            assert!(err.to_string().contains(&value.to_string()));
        }
    }

    #[test]
    fn unknown_key_reported_before_invalid_value() {
        let err = validate(&raw(json!({"browser": "yes", "rotateProxy": true}))).unwrap_err();
        assert_eq!(err.key(), "rotateProxy");
    }

    #[test]
    fn unknown_keys_reported_in_sorted_order() {
        let err = validate(&raw(json!({"zzz": true, "aaa": true}))).unwrap_err();
        assert_eq!(err.key(), "aaa");
    }

    #[test]
    fn first_violation_follows_table_order() {
        let err =
            validate(&raw(json!({"js_strategy": 1, "screenshot": "no", "browser": "x"})))
                .unwrap_err();
        assert_eq!(err.key(), "browser");
    }

    #[test]
    fn input_is_not_modified() {
        let input = raw(json!({"browser": true}));
        let before = input.clone();
        validate(&input).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn serializes_with_wire_names() {
        let config = validate(&raw(json!({
            "browser": true,
            "wait_for_load": true,
            "js_strategy": "DEFAULT"
        })))
        .unwrap();

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            json!({
                "browser": true,
                "rotateProxy": false,
                "waitForLoad": true,
                "screenshot": false,
                "jsStrategy": "DEFAULT"
            })
        );
    }

    #[test]
    fn ineffective_options_without_browser() {
        let config = validate(&raw(json!({
            "screenshot": true,
            "js_strategy": true,
            "rotate_proxy": true
        })))
        .unwrap();
        assert_eq!(config.ineffective_options(), vec!["screenshot", "js_strategy"]);

        let config = validate(&raw(json!({"browser": true, "screenshot": true}))).unwrap();
        assert!(config.ineffective_options().is_empty());
    }

    #[test]
    fn get_unknown_key_is_none() {
        assert!(ValidatedConfig::default().get("headless").is_none());
    }
}
