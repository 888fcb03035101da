//! Immutable context store threaded through a call graph.
//!
//! # Data Flow
//! ```text
//! caller holds Context
//!     → builder reads chain/columns (store.rs lookups by key)
//!     → strategy decides whether to write back
//!     → write = new node linked to the old one (copy-on-write)
//!     → caller receives the new handle; the old one is untouched
//! ```
//!
//! # Design Decisions
//! - Persistent linked list of key/value nodes, newest first
//! - Values are `Arc<dyn Any + Send + Sync>` so handles are cheap to clone
//!   and safe to share across threads
//! - Removing a key pushes a tombstone instead of rebuilding the list

pub mod keys;
pub mod store;

pub use keys::ContextKey;
pub use store::Context;
