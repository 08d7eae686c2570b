//! Context-aware handler decorators
//!
//! [`ContextAttr`] wraps an inner handler. When the record's context binds
//! its key, it appends one attribute named after the key, then forwards the
//! record unconditionally.

use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

use crate::context::{Context, ContextKey};
use crate::error::Result;
use crate::handler::Handler;
use crate::level::Level;
use crate::record::Record;
use crate::value::{Attr, Value};

/// Decorator that copies the `K` binding from the context onto records
pub struct ContextAttr<K, H> {
    inner: H,
    _key: PhantomData<fn() -> K>,
}

impl<K, H> ContextAttr<K, H>
where
    K: ContextKey,
    K::Value: Clone + Into<Value>,
    H: Handler,
{
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            _key: PhantomData,
        }
    }

    /// Wrap `inner` and erase the type, for building chains as plain functions
    pub fn wrap(inner: H) -> Arc<dyn Handler>
    where
        H: 'static,
    {
        Arc::new(Self::new(inner))
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<K, H> Handler for ContextAttr<K, H>
where
    K: ContextKey,
    K::Value: Clone + Into<Value>,
    H: Handler,
{
    fn enabled(&self, ctx: &Context, level: Level) -> bool {
        self.inner.enabled(ctx, level)
    }

    fn handle(&self, ctx: &Context, mut record: Record) -> Result<()> {
        if let Some(value) = ctx.value::<K>() {
            trace!(attr = K::ATTR, "[ContextAttr] enriching record from context");
            record.add_attr(Attr::new(K::ATTR, value.clone()));
        }
        self.inner.handle(ctx, record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        Arc::new(ContextAttr::<K, Arc<dyn Handler>>::new(
            self.inner.with_attrs(attrs),
        ))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(ContextAttr::<K, Arc<dyn Handler>>::new(
            self.inner.with_group(name),
        ))
    }
}
