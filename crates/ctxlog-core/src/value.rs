//! Loggable values and attributes

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Maximum number of `LogValuer` hops followed before giving up.
pub const MAX_RESOLVE_DEPTH: usize = 100;

/// A type that chooses its own logged representation.
///
/// Resolution is deferred until the record is encoded, so whatever the
/// valuer returns is the only form that ever reaches the output.
pub trait LogValuer: Send + Sync {
    fn log_value(&self) -> Value;
}

/// A loggable value
#[derive(Clone)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Time(DateTime<Utc>),
    /// Nested attributes, encoded as a JSON object
    Group(Vec<Attr>),
    /// Deferred value, resolved at encode time
    Valuer(Arc<dyn LogValuer>),
}

impl Value {
    /// Wrap a `LogValuer` for deferred resolution
    pub fn valuer(v: impl LogValuer + 'static) -> Self {
        Value::Valuer(Arc::new(v))
    }

    /// Errors are logged as their display message
    pub fn error(err: &(dyn std::error::Error + '_)) -> Self {
        Value::String(err.to_string())
    }

    /// Follow `LogValuer` indirections until a concrete value is reached
    pub fn resolve(self) -> Resolved {
        let mut value = self;
        for _ in 0..MAX_RESOLVE_DEPTH {
            value = match value {
                Value::String(s) => return Resolved::String(s),
                Value::Int(i) => return Resolved::Int(i),
                Value::Uint(u) => return Resolved::Uint(u),
                Value::Float(f) => return Resolved::Float(f),
                Value::Bool(b) => return Resolved::Bool(b),
                Value::Time(t) => return Resolved::Time(t),
                Value::Group(attrs) => return Resolved::Group(attrs),
                Value::Valuer(v) => v.log_value(),
            };
        }
        Resolved::String(format!(
            "log value resolution exceeded {} levels",
            MAX_RESOLVE_DEPTH
        ))
    }

    /// Encode as JSON, resolving deferred values
    pub fn to_json(&self) -> JsonValue {
        self.clone().resolve().to_json()
    }
}

/// A value with every `LogValuer` indirection followed
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Time(DateTime<Utc>),
    Group(Vec<Attr>),
}

impl Resolved {
    pub fn to_json(self) -> JsonValue {
        match self {
            Resolved::String(s) => JsonValue::String(s),
            Resolved::Int(i) => JsonValue::from(i),
            Resolved::Uint(u) => JsonValue::from(u),
            Resolved::Float(f) => serde_json::Number::from_f64(f)
                .map(JsonValue::Number)
                .unwrap_or_else(|| JsonValue::String(f.to_string())),
            Resolved::Bool(b) => JsonValue::Bool(b),
            Resolved::Time(t) => {
                JsonValue::String(t.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Resolved::Group(attrs) => {
                let mut map = Map::new();
                encode_attrs(&mut map, &attrs);
                JsonValue::Object(map)
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Time(t) => f.debug_tuple("Time").field(t).finish(),
            Value::Group(attrs) => f.debug_tuple("Group").field(attrs).finish(),
            // Only the resolved form is ever shown
            Value::Valuer(_) => f
                .debug_tuple("Valuer")
                .field(&self.clone().resolve())
                .finish(),
        }
    }
}

impl PartialEq for Value {
    /// Compares resolved values
    fn eq(&self, other: &Self) -> bool {
        self.clone().resolve() == other.clone().resolve()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64, isize);
impl_from_int!(Uint as u64: u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Time(v)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Value::Group(attrs)
    }
}

/// A key/value pair attached to a record
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Attribute whose value is the error's display message
    pub fn error(key: impl Into<String>, err: &(dyn std::error::Error + '_)) -> Self {
        Self {
            key: key.into(),
            value: Value::error(err),
        }
    }

    /// Nested group of attributes. An empty key inlines the members.
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            key: key.into(),
            value: Value::Group(attrs),
        }
    }
}

/// Encode attributes into a JSON object.
///
/// The first occurrence of a key wins; later duplicates are dropped so that
/// attributes appended further out in a handler chain never overwrite
/// attributes already present. Groups that encode to nothing are omitted and
/// groups with an empty key are inlined.
pub fn encode_attrs(map: &mut Map<String, JsonValue>, attrs: &[Attr]) {
    for attr in attrs {
        let encoded = match attr.value.clone().resolve() {
            Resolved::Group(members) if attr.key.is_empty() => {
                encode_attrs(map, &members);
                continue;
            }
            Resolved::Group(members) => {
                let mut nested = Map::new();
                encode_attrs(&mut nested, &members);
                if nested.is_empty() {
                    continue;
                }
                JsonValue::Object(nested)
            }
            other => other.to_json(),
        };
        insert_first(map, attr.key.clone(), encoded);
    }
}

/// Insert unless `key` is already present; a dropped duplicate is reported
/// at debug level.
pub fn insert_first(map: &mut Map<String, JsonValue>, key: String, value: JsonValue) {
    if map.contains_key(&key) {
        debug!(key = %key, "[encode_attrs] duplicate key dropped");
        return;
    }
    map.insert(key, value);
}
