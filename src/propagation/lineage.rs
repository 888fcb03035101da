//! Method + fingerprint carry-over between records.
//!
//! A record can remember the leading segment it was created for (its
//! method) and the segments that followed. Releasing the record copies that
//! lineage into a context so records built later from it start from the same
//! method, even without a caller-side chain.

use std::iter;

use serde_json::Value;

use crate::context::keys::LINEAGE_KEY;
use crate::context::Context;
use crate::model::Chain;
use crate::sink::Entry;

/// Record field holding the method.
pub const KEY_METHOD: &str = "method_";

/// Record field holding the fingerprint that follows the method.
pub const KEY_LINEAGE_FP: &str = "log.lineage";

/// Placeholder method set on entries made straight from a sink.
pub const DEFAULT_METHOD: &str = "-";

/// Add `segments` to the entry's lineage.
///
/// Without a method (or with the placeholder) the first segment becomes the
/// method and the rest replace the fingerprint. Otherwise all segments are
/// appended to the fingerprint.
pub fn insert(entry: Entry, segments: &[String]) -> Entry {
    let Some((first, rest)) = segments.split_first() else {
        return entry;
    };

    if method_of(&entry).is_some() {
        let mut fingerprint = fingerprint_of(&entry);
        fingerprint.extend(segments.iter().cloned());
        entry.with_field(KEY_LINEAGE_FP, fingerprint)
    } else {
        entry
            .with_field(KEY_METHOD, first.clone())
            .with_field(KEY_LINEAGE_FP, rest.to_vec())
    }
}

/// Lineage as a chain `[method, ...fingerprint]`.
///
/// `None` when the entry has no method or only the placeholder.
pub fn extract(entry: &Entry) -> Option<Chain> {
    let method = method_of(entry)?.to_string();
    Some(Chain::new(iter::once(method).chain(fingerprint_of(entry))))
}

/// Lineage cached in `ctx` by [`release`].
pub fn from_context(ctx: &Context) -> Option<&Chain> {
    ctx.value(LINEAGE_KEY)
}

/// Cache the entry's lineage in a new context.
///
/// Returns `ctx` itself when there is nothing to carry over.
pub fn release(ctx: &Context, entry: &Entry) -> Context {
    match extract(entry) {
        Some(lineage) => ctx.with_value(LINEAGE_KEY, lineage),
        None => ctx.clone(),
    }
}

fn method_of(entry: &Entry) -> Option<&str> {
    entry
        .data()
        .get(KEY_METHOD)
        .and_then(Value::as_str)
        .filter(|method| *method != DEFAULT_METHOD)
}

fn fingerprint_of(entry: &Entry) -> Vec<String> {
    entry
        .data()
        .get(KEY_LINEAGE_FP)
        .and_then(Value::as_array)
        .map(|segments| {
            segments
                .iter()
                .filter_map(|s| s.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_segment_becomes_method() {
        let entry = insert(Entry::discard(), &segs(&["handler", "parse", "validate"]));
        assert_eq!(entry.data()[KEY_METHOD], json!("handler"));
        assert_eq!(entry.data()[KEY_LINEAGE_FP], json!(["parse", "validate"]));
    }

    #[test]
    fn test_placeholder_method_is_replaced() {
        let entry = Entry::discard().with_field(KEY_METHOD, DEFAULT_METHOD);
        let entry = insert(entry, &segs(&["handler"]));
        assert_eq!(entry.data()[KEY_METHOD], json!("handler"));
        assert_eq!(entry.data()[KEY_LINEAGE_FP], json!([]));
    }

    #[test]
    fn test_existing_method_appends() {
        let entry = insert(Entry::discard(), &segs(&["handler", "a"]));
        let entry = insert(entry, &segs(&["b", "c"]));
        assert_eq!(entry.data()[KEY_METHOD], json!("handler"));
        assert_eq!(entry.data()[KEY_LINEAGE_FP], json!(["a", "b", "c"]));
    }

    #[test]
    fn test_empty_segments_noop() {
        let entry = insert(Entry::discard(), &[]);
        assert!(entry.data().is_empty());
    }

    #[test]
    fn test_extract_requires_real_method() {
        assert!(extract(&Entry::discard()).is_none());
        let placeholder = Entry::discard().with_field(KEY_METHOD, DEFAULT_METHOD);
        assert!(extract(&placeholder).is_none());

        let entry = insert(Entry::discard(), &segs(&["handler", "a"]));
        assert_eq!(extract(&entry).unwrap().segments(), ["handler", "a"]);
    }

    #[test]
    fn test_release_into_context() {
        let ctx = Context::background();
        let untouched = release(&ctx, &Entry::discard());
        assert!(Context::ptr_eq(&ctx, &untouched));

        let entry = insert(Entry::discard(), &segs(&["handler", "a"]));
        let released = release(&ctx, &entry);
        assert_eq!(from_context(&released).unwrap().render(), "/handler/a");
        // independent of the propagated chain
        assert!(released.chain().is_none());
    }
}
