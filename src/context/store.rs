//! Copy-on-write key/value store.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::context::keys::{ContextKey, CHAIN_KEY, COLUMNS_KEY};
use crate::model::{Chain, Columns};

type Value = Arc<dyn Any + Send + Sync>;

struct Node {
    key: ContextKey,
    /// `None` is a tombstone hiding older values for `key`.
    value: Option<Value>,
    parent: Option<Arc<Node>>,
}

/// An immutable handle to a set of keyed values.
///
/// Writing never changes `self`; it returns a new handle sharing all older
/// entries with the original.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// An empty context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Return a new context with `value` stored under `key`.
    pub fn with_value<T>(&self, key: ContextKey, value: T) -> Context
    where
        T: Any + Send + Sync,
    {
        self.push(key, Some(Arc::new(value)))
    }

    /// Return a new context in which `key` is absent.
    pub fn without(&self, key: ContextKey) -> Context {
        if self.lookup(key).is_none() {
            return self.clone();
        }
        self.push(key, None)
    }

    /// Look up the value stored under `key`, if it has type `T`.
    pub fn value<T>(&self, key: ContextKey) -> Option<&T>
    where
        T: Any + Send + Sync,
    {
        self.lookup(key)?.downcast_ref::<T>()
    }

    /// Chain inherited from ancestors.
    pub fn chain(&self) -> Option<&Chain> {
        self.value(CHAIN_KEY)
    }

    /// Columns inherited from ancestors.
    pub fn columns(&self) -> Option<&Columns> {
        self.value(COLUMNS_KEY)
    }

    /// Store a chain for descendants.
    pub fn with_chain(&self, chain: Chain) -> Context {
        self.with_value(CHAIN_KEY, chain)
    }

    /// Store columns for descendants.
    pub fn with_columns(&self, columns: Columns) -> Context {
        self.with_value(COLUMNS_KEY, columns)
    }

    /// Drop the inherited chain.
    pub fn detach_chain(&self) -> Context {
        self.without(CHAIN_KEY)
    }

    /// True if both handles point at the same snapshot.
    pub fn ptr_eq(a: &Context, b: &Context) -> bool {
        match (&a.head, &b.head) {
            (Some(x), Some(y)) => Arc::ptr_eq(x, y),
            (None, None) => true,
            _ => false,
        }
    }

    fn push(&self, key: ContextKey, value: Option<Value>) -> Context {
        Context {
            head: Some(Arc::new(Node {
                key,
                value,
                parent: self.head.clone(),
            })),
        }
    }

    fn lookup(&self, key: ContextKey) -> Option<&(dyn Any + Send + Sync)> {
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            if node.key == key {
                return node.value.as_deref();
            }
            cursor = node.parent.as_deref();
        }
        None
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        // Unlink iteratively so very deep contexts don't overflow the stack
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::new();
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            keys.push(node.key.0);
            cursor = node.parent.as_deref();
        }
        f.debug_struct("Context")
            .field("chain", &self.chain().map(Chain::render))
            .field("keys", &keys)
            .finish()
    }
}
