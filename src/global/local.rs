//! Local (development) loggers.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};

use crate::context::Context;
use crate::factory::{EntrySource, Factory, Record};
use crate::sink::{DiscardSink, TracingSink};

/// Record field naming the local logger kind.
pub const KEY_LOCAL_METHOD: &str = "log.local";

static DEV_ENABLED: AtomicBool = AtomicBool::new(true);

static LOCAL: LazyLock<Arc<Factory>> =
    LazyLock::new(|| Factory::with_source(EntrySource::Sink(Arc::new(TracingSink::local()))));

static DISCARD: LazyLock<Arc<Factory>> =
    LazyLock::new(|| Factory::with_source(EntrySource::Sink(Arc::new(DiscardSink))));

/// Enable or disable every local logger.
pub fn set_dev_enabled(enabled: bool) {
    DEV_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether local loggers currently emit.
pub fn dev_enabled() -> bool {
    DEV_ENABLED.load(Ordering::Relaxed)
}

/// Kinds of local logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalMethod {
    Dev,
    Init,
    Exit,
}

impl LocalMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocalMethod::Dev => "dev",
            LocalMethod::Init => "init",
            LocalMethod::Exit => "exit",
        }
    }

    /// A record on the local sink, or a discarded one when dev logging is off.
    pub fn log<I, S>(self, names: I) -> Record
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let factory = if dev_enabled() { &LOCAL } else { &DISCARD };
        factory
            .builder(&Context::background())
            .name(names)
            .field(KEY_LOCAL_METHOD, self.as_str())
            .leaf()
    }
}

impl fmt::Display for LocalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
