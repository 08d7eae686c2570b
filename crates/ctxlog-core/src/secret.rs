//! Sensitive values that never reach log output in raw form

use serde::{Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

use crate::value::{LogValuer, Value};

/// Placeholder rendered in place of every secret
pub const MASK: &str = "********";

/// A sensitive string (password, token, key material).
///
/// Every rendering path yields [`MASK`]: log encoding, `Display`, `Debug` and
/// `Serialize`. The backing memory is zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Raw secret content, for code that must actually use it
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl LogValuer for Secret {
    fn log_value(&self) -> Value {
        Value::String(MASK.to_string())
    }
}

impl From<Secret> for Value {
    fn from(secret: Secret) -> Self {
        Value::valuer(secret)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&MASK).finish()
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(MASK)
    }
}
