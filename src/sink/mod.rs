//! Entry sink abstraction.
//!
//! # Data Flow
//! ```text
//! Factory::make_entry(ctx)
//!     → entry.rs (Entry: sink handle + flat field map)
//!     → with_field / with_fields (copy-on-write)
//!     → emit(level, message)
//!     → Sink implementation:
//!         - tracing_sink.rs (forward to the tracing subscriber)
//!         - memory.rs (capture in memory, or discard)
//! ```
//!
//! # Design Decisions
//! - The core never formats or writes bytes; sinks own that
//! - A sink sees one flat map per record; nested state is already merged

pub mod entry;
pub mod memory;
pub mod tracing_sink;

use std::fmt;

use crate::model::Fields;

pub use entry::Entry;
pub use memory::{DiscardSink, EmittedRecord, MemorySink};
pub use tracing_sink::TracingSink;

/// Severity passed through to the sink untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for finished records.
pub trait Sink: Send + Sync + fmt::Debug {
    /// Write one record.
    fn emit(&self, level: Level, message: &str, fields: &Fields);
}
