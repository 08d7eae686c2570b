//! In-flight log records

use chrono::{DateTime, Utc};

use crate::level::Level;
use crate::value::Attr;

/// One log event before serialization.
///
/// Built at the call site, moved through the handler chain, consumed by the
/// terminal handler. Handlers may append attributes but never remove them.
#[derive(Debug, Clone)]
pub struct Record {
    /// Event time; `None` leaves the time field out of the output
    pub time: Option<DateTime<Utc>>,
    pub level: Level,
    pub message: String,
    attrs: Vec<Attr>,
}

impl Record {
    /// Create a record stamped with the current time
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Some(Utc::now()),
            level,
            message: message.into(),
            attrs: Vec::new(),
        }
    }

    /// Drop the timestamp
    pub fn without_time(mut self) -> Self {
        self.time = None;
        self
    }

    pub fn add_attr(&mut self, attr: Attr) {
        self.attrs.push(attr);
    }

    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    /// Attributes in insertion order
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }
}
