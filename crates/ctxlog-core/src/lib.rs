//! # ctxlog Core Library
//!
//! Structured logging where handler decorators pull values out of a
//! request-scoped context and attach them to records as attributes.
//!
//! ## Modules
//!
//! - `context` - Immutable, chainable request context with typed keys
//! - `value` - Loggable values, attributes and deferred `LogValuer`s
//! - `record` - In-flight log records
//! - `handler` - The `Handler` trait shared by sinks and decorators
//! - `json` - JSON-lines terminal handler and its options
//! - `capture` - In-memory capture sink
//! - `enrich` - Context-to-attribute decorators
//! - `secret` - Values that always render masked
//! - `trace_context` - Trace/client ID keys and decorators
//! - `logger` - Call-site front end

pub mod capture;
pub mod context;
pub mod enrich;
pub mod error;
pub mod handler;
pub mod json;
pub mod level;
pub mod logger;
pub mod record;
pub mod secret;
pub mod trace_context;
pub mod value;

// Re-export commonly used types
pub use capture::CaptureBuffer;
pub use context::{Context, ContextKey};
pub use enrich::ContextAttr;
pub use error::{HandlerError, Result};
pub use handler::Handler;
pub use json::{HandlerOptions, JsonHandler};
pub use level::Level;
pub use logger::Logger;
pub use record::Record;
pub use secret::{Secret, MASK};
pub use trace_context::{ClientIdHandler, ClientIdKey, TraceIdHandler, TraceIdKey};
pub use value::{Attr, LogValuer, Resolved, Value};
