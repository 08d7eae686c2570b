//! Handler trait
//!
//! A handler receives records together with the request-scoped context they
//! were logged under. Terminal handlers serialize; decorators enrich and
//! forward.

use std::sync::Arc;

use crate::context::Context;
use crate::error::Result;
use crate::level::Level;
use crate::record::Record;
use crate::value::Attr;

/// Anything that can handle a log record
pub trait Handler: Send + Sync {
    /// Whether records at `level` would be handled at all
    fn enabled(&self, ctx: &Context, level: Level) -> bool;

    /// Handle one record. Decorators must forward unconditionally and return
    /// the inner handler's result unchanged.
    fn handle(&self, ctx: &Context, record: Record) -> Result<()>;

    /// A handler that includes `attrs` on every record it handles
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// A handler that nests attributes added afterwards, and every record's
    /// own attributes, under `name`. An empty name adds no nesting.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn enabled(&self, ctx: &Context, level: Level) -> bool {
        (**self).enabled(ctx, level)
    }

    fn handle(&self, ctx: &Context, record: Record) -> Result<()> {
        (**self).handle(ctx, record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        (**self).with_attrs(attrs)
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        (**self).with_group(name)
    }
}
