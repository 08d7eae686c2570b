//! Logger front end
//!
//! Builds records at the call site and hands them to the handler chain
//! together with the caller's context.

use std::sync::Arc;

use crate::context::Context;
use crate::error::Result;
use crate::handler::Handler;
use crate::level::Level;
use crate::record::Record;
use crate::value::Attr;

/// Cheap-to-clone handle over a handler chain
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Logger whose records all carry `attrs`
    pub fn with(&self, attrs: Vec<Attr>) -> Self {
        if attrs.is_empty() {
            return self.clone();
        }
        Self {
            handler: self.handler.with_attrs(attrs),
        }
    }

    /// Logger whose later attributes, and every record's own attributes,
    /// nest under `name`
    pub fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        Self {
            handler: self.handler.with_group(name),
        }
    }

    pub fn enabled(&self, ctx: &Context, level: Level) -> bool {
        self.handler.enabled(ctx, level)
    }

    /// Log `message` at `level` under `ctx`.
    ///
    /// Records below the handler's level are dropped before they are built.
    /// Any handler failure is returned to the caller.
    pub fn log_ctx(
        &self,
        ctx: &Context,
        level: Level,
        message: &str,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> Result<()> {
        if !self.handler.enabled(ctx, level) {
            return Ok(());
        }
        let mut record = Record::new(level, message);
        record.add_attrs(attrs);
        self.handler.handle(ctx, record)
    }

    pub fn debug_ctx(
        &self,
        ctx: &Context,
        message: &str,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> Result<()> {
        self.log_ctx(ctx, Level::Debug, message, attrs)
    }

    pub fn info_ctx(
        &self,
        ctx: &Context,
        message: &str,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> Result<()> {
        self.log_ctx(ctx, Level::Info, message, attrs)
    }

    pub fn warn_ctx(
        &self,
        ctx: &Context,
        message: &str,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> Result<()> {
        self.log_ctx(ctx, Level::Warn, message, attrs)
    }

    pub fn error_ctx(
        &self,
        ctx: &Context,
        message: &str,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> Result<()> {
        self.log_ctx(ctx, Level::Error, message, attrs)
    }

    pub fn debug(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) -> Result<()> {
        self.debug_ctx(&Context::background(), message, attrs)
    }

    pub fn info(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) -> Result<()> {
        self.info_ctx(&Context::background(), message, attrs)
    }

    pub fn warn(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) -> Result<()> {
        self.warn_ctx(&Context::background(), message, attrs)
    }

    pub fn error(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) -> Result<()> {
        self.error_ctx(&Context::background(), message, attrs)
    }
}
