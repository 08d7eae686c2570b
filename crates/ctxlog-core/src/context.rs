//! Request-scoped context
//!
//! An immutable, chainable key/value carrier propagated alongside a logical
//! operation. Each derivation layers exactly one binding over its parent;
//! lookups walk outward from the newest binding until a match or the root.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A compile-time-distinct context key.
///
/// Keys are zero-sized marker types. Two unrelated keys never collide even if
/// they render under the same attribute name, because lookups match on the
/// key's type rather than on a string.
pub trait ContextKey: 'static {
    /// Type of the value bound under this key
    type Value: Send + Sync + 'static;

    /// Attribute name used when the binding is attached to a log record
    const ATTR: &'static str;
}

struct Node {
    key: TypeId,
    key_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

/// Immutable request-scoped context.
///
/// Cloning is cheap (one `Arc` bump). Deriving never touches the parent, so
/// ancestor handles held elsewhere keep seeing exactly the bindings they had.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// The empty root context
    pub fn background() -> Self {
        Self { head: None }
    }

    /// Derive a new context that binds `value` under `K`
    pub fn with_value<K: ContextKey>(&self, value: K::Value) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key: TypeId::of::<K>(),
                key_name: std::any::type_name::<K>(),
                value: Box::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Look up the value bound under `K`, nearest binding first
    pub fn value<K: ContextKey>(&self) -> Option<&K::Value> {
        let wanted = TypeId::of::<K>();
        self.nodes()
            .find(|node| node.key == wanted)
            .and_then(|node| node.value.downcast_ref::<K::Value>())
    }

    /// Whether any binding exists for `K`
    pub fn contains<K: ContextKey>(&self) -> bool {
        self.value::<K>().is_some()
    }

    /// Number of bindings layered over the root (shadowed ones included)
    pub fn depth(&self) -> usize {
        self.nodes().count()
    }

    pub fn is_background(&self) -> bool {
        self.head.is_none()
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.nodes().map(|node| node.key_name))
            .finish()
    }
}
