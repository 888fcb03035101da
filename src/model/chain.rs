//! Fingerprint chains.
//!
//! # Responsibilities
//! - Hold an ordered path of segments in append order
//! - Join a base chain with a fragment without touching either operand
//! - Render as `/a/b/c`
//!
//! # Design Decisions
//! - Backed by `Arc<[String]>`: a published chain is frozen and cloning it is
//!   a reference count bump
//! - "No chain" is `Option::<Chain>::None` and is distinct from an empty chain

use std::fmt;
use std::sync::Arc;

/// An ordered, immutable sequence of path segments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chain(Arc<[String]>);

impl Chain {
    /// Create a chain from segments, keeping their order.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the chain has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments in append order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns `self` followed by `fragment`.
    ///
    /// An empty fragment returns a clone of `self` sharing the same storage.
    pub fn join(&self, fragment: &Chain) -> Chain {
        if fragment.is_empty() {
            return self.clone();
        }

        let mut segments = Vec::with_capacity(self.len() + fragment.len());
        segments.extend_from_slice(&self.0);
        segments.extend_from_slice(&fragment.0);
        Self(segments.into())
    }

    /// Render as `/` for an empty chain, `/seg1/seg2` otherwise.
    pub fn render(&self) -> String {
        if self.0.is_empty() {
            return "/".to_string();
        }
        let mut out = String::with_capacity(self.0.iter().map(|s| s.len() + 1).sum());
        for segment in self.0.iter() {
            out.push('/');
            out.push_str(segment);
        }
        out
    }

    /// True if both chains share the same backing storage.
    pub fn ptr_eq(a: &Chain, b: &Chain) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

/// Join two optional chains.
///
/// - `base` absent: `fragment` is returned as is (possibly absent too)
/// - `fragment` absent or empty: `base` is returned without copying
/// - otherwise a new chain holding both
pub fn join(base: Option<&Chain>, fragment: Option<&Chain>) -> Option<Chain> {
    let Some(base) = base else {
        return fragment.cloned();
    };
    match fragment {
        Some(fragment) => Some(base.join(fragment)),
        None => Some(base.clone()),
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Vec<String>> for Chain {
    fn from(segments: Vec<String>) -> Self {
        Self(segments.into())
    }
}

impl From<&[&str]> for Chain {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
