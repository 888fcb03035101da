//! Record factory: entry sources, builders and their pool.
//!
//! # Data Flow
//! ```text
//! Factory::builder(ctx)
//!     → pool.rs (acquire a clean fragment state)
//!     → builder.rs (name / field / strategy)
//!     → build():
//!         → propagation engine (record state + outgoing context)
//!         → make_entry(ctx) from the current EntrySource
//!         → record.rs (Record)
//!     → pool.rs (state reset and returned)
//! ```
//!
//! # Design Decisions
//! - The source is a closed enum: entry maker, prebuilt entry, or raw sink
//! - The source sits behind an `ArcSwap`; reconfiguring swaps a fully built
//!   value and readers keep whatever snapshot they loaded
//! - Construction without a source is an error, never a silent default

pub mod builder;
pub mod pool;
pub mod record;

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::LogConfig;
use crate::context::keys::ENTRY_KEY;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::propagation::lineage::{DEFAULT_METHOD, KEY_METHOD};
use crate::sink::{DiscardSink, Entry, Sink, TracingSink};

pub use builder::Builder;
pub use pool::{BuilderPool, BuilderState};
pub use record::Record;

use record::{KEY_SOURCE, SOURCE_MAKER, SOURCE_PREBUILT, SOURCE_SINK};

/// Sink kinds accepted in configuration.
pub const SINK_KINDS: &[&str] = &["tracing", "discard"];

/// Makes the base entry for a context. `None` means no record can be made.
pub type EntryMaker = Arc<dyn Fn(&Context) -> Option<Entry> + Send + Sync>;

/// Where a factory gets its base entries from.
#[derive(Clone)]
pub enum EntrySource {
    /// Called for every record.
    Maker(EntryMaker),
    /// Cloned for every record.
    Prebuilt(Entry),
    /// Wrapped in a fresh entry for every record.
    Sink(Arc<dyn Sink>),
}

impl EntrySource {
    /// Resolve a configured sink kind, one of [`SINK_KINDS`].
    ///
    /// `None` is [`Error::MissingSink`]; an unknown kind is
    /// [`Error::ArgumentTypeMismatch`]. A
    /// [`MemorySink`](crate::sink::MemorySink) is not a config kind; pass one
    /// explicitly with [`EntrySource::Sink`].
    pub fn from_kind(kind: Option<&str>) -> Result<Self> {
        let kind = kind.ok_or(Error::MissingSink)?;
        let sink: Arc<dyn Sink> = match kind {
            "tracing" => Arc::new(TracingSink::new()),
            "discard" => Arc::new(DiscardSink),
            other => {
                return Err(Error::ArgumentTypeMismatch {
                    kind: other.to_string(),
                })
            }
        };
        Ok(EntrySource::Sink(sink))
    }

    fn label(&self) -> &'static str {
        match self {
            EntrySource::Maker(_) => SOURCE_MAKER,
            EntrySource::Prebuilt(_) => SOURCE_PREBUILT,
            EntrySource::Sink(_) => SOURCE_SINK,
        }
    }
}

impl fmt::Debug for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntrySource::Maker(_) => f.write_str("EntrySource::Maker(..)"),
            EntrySource::Prebuilt(entry) => f.debug_tuple("EntrySource::Prebuilt").field(entry).finish(),
            EntrySource::Sink(sink) => f.debug_tuple("EntrySource::Sink").field(sink).finish(),
        }
    }
}

/// Builds records from an entry source.
#[derive(Debug)]
pub struct Factory {
    source: ArcSwap<EntrySource>,
    pool: BuilderPool,
}

impl Factory {
    /// Create a factory. A missing source is an error.
    pub fn new(source: Option<EntrySource>) -> Result<Arc<Self>> {
        let source = source.ok_or(Error::MissingSink)?;
        Ok(Self::with_source(source))
    }

    /// Create a factory from a source that is known to be present.
    pub fn with_source(source: EntrySource) -> Arc<Self> {
        Self::with_pool(source, BuilderPool::default())
    }

    /// Create a factory with a custom builder pool.
    pub fn with_pool(source: EntrySource, pool: BuilderPool) -> Arc<Self> {
        Arc::new(Self {
            source: ArcSwap::from_pointee(source),
            pool,
        })
    }

    /// Create a factory from configuration.
    pub fn from_config(config: &LogConfig) -> Result<Arc<Self>> {
        let source = EntrySource::from_kind(config.sink.kind.as_deref())?;
        Ok(Self::with_pool(source, BuilderPool::new(config.pool.capacity)))
    }

    /// Replace the entry source. Builds already in flight keep the old one.
    pub fn set_source(&self, source: EntrySource) {
        tracing::debug!(source = source.label(), "factory source replaced");
        self.source.store(Arc::new(source));
    }

    /// Replace the entry source with an entry maker.
    pub fn set_entry_maker(&self, maker: EntryMaker) {
        self.set_source(EntrySource::Maker(maker));
    }

    /// Current entry source.
    pub fn source(&self) -> Arc<EntrySource> {
        self.source.load_full()
    }

    pub fn pool(&self) -> &BuilderPool {
        &self.pool
    }

    /// Start a builder for `ctx`.
    pub fn builder(self: &Arc<Self>, ctx: &Context) -> Builder {
        Builder::new(self.clone(), ctx.clone())
    }

    /// Make the base entry for `ctx`.
    ///
    /// An entry cached in the context with [`cache_entry`] is reused as is.
    pub fn make_entry(&self, ctx: &Context) -> Option<Entry> {
        if let Some(cached) = ctx.value::<Entry>(ENTRY_KEY) {
            return Some(cached.clone());
        }

        let source = self.source.load();
        let entry = match &**source {
            EntrySource::Maker(maker) => maker(ctx)?,
            EntrySource::Prebuilt(entry) => entry.clone(),
            EntrySource::Sink(sink) => {
                Entry::new(sink.clone()).with_field(KEY_METHOD, DEFAULT_METHOD)
            }
        };
        Some(entry.with_field(KEY_SOURCE, source.label()))
    }

    /// Record for this call only ([`Strategy::ForkLeaf`](crate::Strategy::ForkLeaf)).
    pub fn leaf<I, S>(self: &Arc<Self>, ctx: &Context, names: I) -> Record
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder(ctx).name(names).leaf()
    }

    /// Record plus a context descendants inherit from.
    pub fn branch<I, S>(self: &Arc<Self>, ctx: &Context, names: I) -> (Record, Context)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder(ctx).name(names).branch()
    }

    /// Record plus a context restarted from `names` alone.
    pub fn detach<I, S>(self: &Arc<Self>, ctx: &Context, names: I) -> (Record, Context)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder(ctx).name(names).detach()
    }

    /// Record built from an empty context.
    pub fn common<I, S>(self: &Arc<Self>, names: I) -> Record
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leaf(&Context::background(), names)
    }
}

/// Cache `entry` in a new context; the factory reuses it for that context
/// instead of asking its source.
pub fn cache_entry(ctx: &Context, entry: Entry) -> Context {
    ctx.with_value(ENTRY_KEY, entry)
}
