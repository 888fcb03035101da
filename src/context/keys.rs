//! Well-known context keys.

/// Key under which a value is stored in a [`Context`](super::Context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextKey(pub &'static str);

/// Chain inherited by descendants.
pub const CHAIN_KEY: ContextKey = ContextKey("scopelog.chain");

/// Columns inherited by descendants.
pub const COLUMNS_KEY: ContextKey = ContextKey("scopelog.columns");

/// Lineage (method + fingerprint) carried over from a released record.
pub const LINEAGE_KEY: ContextKey = ContextKey("scopelog.lineage");

/// Prebuilt entry the factory reuses instead of making a new one.
pub const ENTRY_KEY: ContextKey = ContextKey("scopelog.entry");
