//! Propagated state: fingerprint chains and attribute columns.
//!
//! # Data Flow
//! ```text
//! context value ⊕ call-site fragment
//!     → chain.rs (join: base segments then fragment segments)
//!     → columns.rs (combine: ordered unique keys, fragment wins)
//!     → attached to the record and/or stored back into the context
//! ```
//!
//! # Design Decisions
//! - Both types are values: every modification of published state allocates
//! - Absent (`None`) and empty are different inputs and both are total

pub mod chain;
pub mod columns;

pub use chain::Chain;
pub use columns::{Column, Columns, Fields};
