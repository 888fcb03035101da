//! Ordered unique attribute sets.
//!
//! # Responsibilities
//! - Keep key/value attributes unique by key and in ascending key order
//! - Insert-or-update batches with last-write-wins
//! - Merge two sets, the right-hand side overriding on collision
//!
//! # Design Decisions
//! - New attributes are appended as an unsorted suffix and the collection is
//!   normalized afterwards: detect the longest non-decreasing prefix, sort
//!   only the suffix, merge the two runs linearly
//! - Batches that arrive already ordered after the existing keys cost O(n)
//! - Sorting is stable and the merge prefers the older run on ties, so after
//!   collapsing equal-key runs to their last element the newest value wins
//!   (including duplicates inside a single batch)

use std::collections::HashMap;

use serde_json::Value;

/// Flat key/value mapping handed to sinks. Iteration order is unspecified.
pub type Fields = HashMap<String, Value>;

/// A single key/value attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: String,
    pub value: Value,
}

impl Column {
    /// Create a column from anything convertible into a JSON value.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered collection of unique-keyed attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Columns(Vec<Column>);

impl Columns {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or update each column, returning the resulting collection.
    pub fn set<I>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        self.set_mut(cols);
        self
    }

    /// In-place form of [`Columns::set`].
    pub fn set_mut<I>(&mut self, cols: I)
    where
        I: IntoIterator<Item = Column>,
    {
        self.0.extend(cols);
        self.normalize();
    }

    /// Insert or update a single key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let col = Column::new(key, value);
        match self.search(&col.key) {
            Ok(index) => self.0[index] = col,
            Err(index) => self.0.insert(index, col),
        }
    }

    /// Merge `other` into a copy of `self`; `other` wins on key collision.
    pub fn combine(&self, other: &Columns) -> Columns {
        if other.is_empty() {
            return self.clone();
        }
        self.clone().set(other.0.iter().cloned())
    }

    /// Restore ascending key order and key uniqueness. Idempotent.
    pub fn sorted(mut self) -> Self {
        self.normalize();
        self
    }

    /// Binary search for `key`.
    ///
    /// `Ok(index)` if present, `Err(insertion_point)` otherwise.
    pub fn search(&self, key: &str) -> Result<usize, usize> {
        self.0.binary_search_by(|col| col.key.as_str().cmp(key))
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.search(key).ok().map(|index| &self.0[index].value)
    }

    /// Flatten into a key/value map for a sink.
    pub fn to_flat_map(&self) -> Fields {
        self.0
            .iter()
            .map(|col| (col.key.clone(), col.value.clone()))
            .collect()
    }

    /// Build from an unordered map.
    pub fn from_fields(fields: Fields) -> Self {
        fields
            .into_iter()
            .map(|(key, value)| Column { key, value })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.0.iter()
    }

    /// Drop every column, keeping the allocation.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    fn normalize(&mut self) {
        if self.0.len() <= 1 {
            return;
        }

        let split = sorted_prefix_len(&self.0);
        if split < self.0.len() {
            let mut tail = self.0.split_off(split);
            tail.sort_by(|a, b| a.key.cmp(&b.key));
            let head = std::mem::take(&mut self.0);
            self.0 = merge(head, tail);
        }

        // Keep the newest element of each equal-key run
        self.0.dedup_by(|later, kept| {
            if later.key == kept.key {
                std::mem::swap(later, kept);
                true
            } else {
                false
            }
        });
    }
}

impl From<Vec<Column>> for Columns {
    fn from(cols: Vec<Column>) -> Self {
        Self(cols).sorted()
    }
}

impl FromIterator<Column> for Columns {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl IntoIterator for Columns {
    type Item = Column;
    type IntoIter = std::vec::IntoIter<Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Columns {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn sorted_prefix_len(cols: &[Column]) -> usize {
    let mut index = 1;
    while index < cols.len() && cols[index - 1].key <= cols[index].key {
        index += 1;
    }
    index
}

/// Stable linear merge of two sorted runs; `left` goes first on ties.
fn merge(left: Vec<Column>, right: Vec<Column>) -> Vec<Column> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.key <= r.key,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        out.extend(next);
    }

    out
}
