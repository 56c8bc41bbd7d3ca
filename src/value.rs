//! Dynamic value representation for task documents.
//!
//! [`Value`] covers everything the document reader understands: `null`,
//! booleans, 32-bit integers, strings, arrays and objects. The task parser uses
//! it to consume values of keys it does not recognize, so a document written by
//! a newer tool still loads.
//!
//! ```rust
//! use todo_tactician::{Deserializer, Value};
//!
//! let mut de = Deserializer::from_str(r#"{ "tags": ["a", "b"], "estimate": 3 }"#);
//! let value = de.parse_value().unwrap();
//!
//! let obj = value.as_object().unwrap();
//! assert_eq!(obj.get("estimate"), Some(&Value::Integer(3)));
//! assert_eq!(obj.get("tags").and_then(Value::as_array).map(Vec::len), Some(2));
//! ```

use indexmap::IndexMap;

/// Ordered map of object keys to values, in document order.
pub type Map = IndexMap<String, Value>;

/// A dynamically-typed document value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i32),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is an object, returns its map. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}
