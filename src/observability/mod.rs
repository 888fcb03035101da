//! Observability of the logging layer itself.
//!
//! # Data Flow
//! ```text
//! builder / pool / factory / config reload produce:
//!     → logging.rs (tracing subscriber setup)
//!     → metrics.rs (counters, gauges)
//! ```
//!
//! # Design Decisions
//! - The crate logs its own lifecycle through `tracing`, never through its
//!   own records, to avoid recursion
//! - Metrics are cheap (no recorder installed means no work)

pub mod logging;
pub mod metrics;
