use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One execution output as produced by the kernel side.
///
/// The payload is opaque to the viewer; it is stored and forwarded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Output(Value);

impl Output {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Convenience constructor for the common `{type, value}` record.
    pub fn typed(mime_type: &str, value: impl Into<Value>) -> Self {
        Self(serde_json::json!({ "type": mime_type, "value": value.into() }))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The `type` field of record-shaped outputs.
    pub fn mime_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub(crate) fn payload(&self) -> Option<&Value> {
        self.0.get("value")
    }
}

impl From<Value> for Output {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
