//! Log record representation and its text encodings.
//!
//! A [`LogRecord`] is built fresh for every call that reaches an open
//! connection. It travels as a pretty-printed JSON object with the fields
//! `app`, `message` and `caller`, in that order.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One log call, ready to be put on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Name of the application that emitted the record.
    pub app: String,
    /// The log arguments, in call order.
    pub message: Vec<Value>,
    /// Caller locator, or `"Unknown"`.
    pub caller: String,
}

impl LogRecord {
    /// Construct a record from its three parts.
    pub fn new(app: impl Into<String>, message: Vec<Value>, caller: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            message,
            caller: caller.into(),
        }
    }

    /// Encode the record as a two-space indented JSON text frame.
    pub fn to_frame(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Convert an arbitrary log argument into a JSON value.
///
/// Values the encoder cannot represent (maps with non-string keys, failing
/// `Serialize` impls) become `null`; non-finite floats are `null` as well.
pub fn to_log_value<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|err| {
        debug!("remote logger: argument could not be encoded ({err}); sending null");
        Value::Null
    })
}

/// Render arguments the way a console prints them: space separated, strings
/// verbatim, everything else as compact JSON.
pub fn console_line(values: &[Value]) -> String {
    values
        .iter()
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
