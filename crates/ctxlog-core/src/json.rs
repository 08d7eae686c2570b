//! JSON terminal handler
//!
//! Writes one JSON object per record, newline terminated:
//! `{"time":...,"level":"INFO","msg":"...",<attrs>}`

use chrono::SecondsFormat;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

use crate::context::Context;
use crate::error::Result;
use crate::handler::Handler;
use crate::level::Level;
use crate::record::Record;
use crate::value::{encode_attrs, insert_first, Attr};

pub const TIME_KEY: &str = "time";
pub const LEVEL_KEY: &str = "level";
pub const MESSAGE_KEY: &str = "msg";

/// Options for the JSON handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerOptions {
    /// Minimum level that is written
    pub level: Level,

    /// Whether the record time is written
    pub add_time: bool,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            level: Level::Info,
            add_time: true,
        }
    }
}

/// Group opened through `with_group`, with the attributes bound inside it
#[derive(Debug, Clone)]
struct OpenGroup {
    name: String,
    attrs: Vec<Attr>,
}

/// Terminal handler that serializes records as JSON lines
pub struct JsonHandler<W> {
    writer: Arc<Mutex<W>>,
    options: HandlerOptions,
    /// Top-level attributes bound through `with_attrs`
    preset: Vec<Attr>,
    /// Open groups, outermost first
    groups: Vec<OpenGroup>,
}

impl<W: Write + Send + 'static> JsonHandler<W> {
    pub fn new(writer: W, options: HandlerOptions) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            options,
            preset: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        let mut map = Map::new();
        if self.options.add_time {
            if let Some(time) = record.time {
                map.insert(
                    TIME_KEY.to_string(),
                    JsonValue::String(time.to_rfc3339_opts(SecondsFormat::Millis, true)),
                );
            }
        }
        map.insert(
            LEVEL_KEY.to_string(),
            JsonValue::String(record.level.as_str().to_string()),
        );
        map.insert(
            MESSAGE_KEY.to_string(),
            JsonValue::String(record.message.clone()),
        );
        encode_attrs(&mut map, &self.preset);

        // Build from the innermost group out; record attributes land in the
        // innermost open group
        let mut nested: Option<(String, Map<String, JsonValue>)> = None;
        for group in self.groups.iter().rev() {
            let mut inner = Map::new();
            encode_attrs(&mut inner, &group.attrs);
            match nested.take() {
                Some((name, child)) => insert_group(&mut inner, name, child),
                None => encode_attrs(&mut inner, record.attrs()),
            }
            nested = Some((group.name.clone(), inner));
        }
        match nested {
            Some((name, child)) => insert_group(&mut map, name, child),
            None => encode_attrs(&mut map, record.attrs()),
        }

        let mut line = serde_json::to_vec(&JsonValue::Object(map))?;
        line.push(b'\n');
        Ok(line)
    }
}

impl<W: Write + Send + 'static> Handler for JsonHandler<W> {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        level >= self.options.level
    }

    fn handle(&self, _ctx: &Context, record: Record) -> Result<()> {
        let line = self.encode(&record)?;
        let mut writer = self.writer.lock();
        if let Err(e) = writer.write_all(&line) {
            debug!(error = %e, "[JsonHandler] write failed");
            return Err(e.into());
        }
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let mut derived = self.derive();
        match derived.groups.last_mut() {
            Some(group) => group.attrs.extend(attrs),
            None => derived.preset.extend(attrs),
        }
        Arc::new(derived)
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut derived = self.derive();
        if !name.is_empty() {
            derived.groups.push(OpenGroup {
                name: name.to_string(),
                attrs: Vec::new(),
            });
        }
        Arc::new(derived)
    }
}

impl<W> JsonHandler<W> {
    /// Copy sharing the same writer
    fn derive(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            options: self.options.clone(),
            preset: self.preset.clone(),
            groups: self.groups.clone(),
        }
    }
}

/// Nest `child` under `name`, leaving out groups that encode to nothing
fn insert_group(map: &mut Map<String, JsonValue>, name: String, child: Map<String, JsonValue>) {
    if !child.is_empty() {
        insert_first(map, name, JsonValue::Object(child));
    }
}
