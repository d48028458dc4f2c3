//! Object-to-string policy for [`LogWriter::write_object`](super::LogWriter::write_object)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Custom renderer applied to the JSON form of a logged object
pub type SerializationOverride = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// How non-string objects are turned into a log payload.
///
/// Objects that serialize to a plain JSON string are always written as that
/// string, unquoted, whatever the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectSerialization {
    /// `{:?}` formatting
    Debug,

    /// The override when one is set, otherwise compact JSON
    #[default]
    Auto,

    /// Compact JSON, falling back to `{:?}` if serialization fails
    Json,

    /// Always the override; `{:?}` when none is set
    Override,
}

pub(crate) fn serialize_object<T>(
    object: &T,
    method: ObjectSerialization,
    override_fn: Option<&SerializationOverride>,
) -> String
where
    T: Serialize + fmt::Debug + ?Sized,
{
    let value = serde_json::to_value(object);
    if let Ok(Value::String(text)) = value {
        return text;
    }

    let debug = || format!("{:?}", object);
    let json = |value: serde_json::Result<Value>| value.map(|v| v.to_string()).unwrap_or_else(|_| debug());
    let overridden = |value: serde_json::Result<Value>, f: &SerializationOverride| {
        value.map(|v| f(&v)).unwrap_or_else(|_| debug())
    };

    match (method, override_fn) {
        (ObjectSerialization::Debug, _) => debug(),
        (ObjectSerialization::Json, _) => json(value),
        (ObjectSerialization::Override, Some(f)) => overridden(value, f),
        (ObjectSerialization::Override, None) => debug(),
        (ObjectSerialization::Auto, Some(f)) => overridden(value, f),
        (ObjectSerialization::Auto, None) => json(value),
    }
}
