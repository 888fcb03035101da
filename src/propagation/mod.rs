//! Propagation engine.
//!
//! # Data Flow
//! ```text
//! Builder::build()
//!     → read chain/columns from the incoming Context
//!     → strategy.rs (ForkLeaf / ForkBranch / NewTree)
//!         → record chain + columns
//!         → outgoing Context (same handle, extended, or restarted)
//!     → lineage.rs (splice cached method/fingerprint into the new entry)
//!
//! Record::release(ctx)
//!     → lineage.rs (copy method/fingerprint into a fresh context value)
//! ```
//!
//! # Design Decisions
//! - The engine is a pure function of (context, fragments, strategy)
//! - ForkLeaf never allocates a context; only the write-back strategies do

pub mod lineage;
pub mod strategy;

pub use strategy::{propagate, Propagation, Strategy};
