//! Configuration parameters passed to a widget at construction time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{Result, WidgetError};

/// Option name → value mapping a widget is constructed with.
///
/// Backed by a JSON object. Keys are kept sorted, so two configs with the same entries
/// always serialize to the same text, which the render cache relies on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetConfig(Map<String, Value>);

impl WidgetConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from a JSON value, which must be an object.
    ///
    /// `null` is accepted as an empty configuration, matching call sites that omit the
    /// parameters entirely.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(WidgetError::InvalidParameters {
                reason: format!("expected a JSON object, found {other}"),
            }),
        }
    }

    /// Merge call-site parameters over the widget's defaults.
    ///
    /// Every key present in `self` wins; keys only present in `defaults` are kept.
    #[must_use]
    pub fn with_defaults(self, defaults: Value) -> Self {
        let mut merged = match defaults {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.extend(self.0);
        Self(merged)
    }

    /// Insert or replace one option.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert back into a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for WidgetConfig {
    type Error = WidgetError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<Map<String, Value>> for WidgetConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
