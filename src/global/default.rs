//! The default factory.

use std::sync::{Arc, LazyLock, Mutex};

use arc_swap::ArcSwap;

use crate::config::LogConfig;
use crate::context::Context;
use crate::error::Result;
use crate::factory::{Builder, EntryMaker, EntrySource, Factory, Record};
use crate::global::local;
use crate::sink::TracingSink;

static DEFAULT: LazyLock<ArcSwap<Factory>> = LazyLock::new(|| {
    ArcSwap::new(Factory::with_source(EntrySource::Sink(Arc::new(
        TracingSink::new(),
    ))))
});

/// Maker installed through [`set_entry_maker`], re-applied on reconfigure.
static ENTRY_MAKER: Mutex<Option<EntryMaker>> = Mutex::new(None);

fn installed_maker() -> Option<EntryMaker> {
    ENTRY_MAKER.lock().ok().and_then(|maker| maker.clone())
}

fn install(factory: Arc<Factory>) {
    DEFAULT.store(factory);
    tracing::debug!("default factory installed");
}

/// Install `factory` as the process-wide default, as is.
///
/// Forgets any maker installed with [`set_entry_maker`].
pub fn init(factory: Arc<Factory>) {
    if let Ok(mut maker) = ENTRY_MAKER.lock() {
        *maker = None;
    }
    install(factory);
}

/// Build a factory from `config`, install it and apply the dev flag.
///
/// A maker installed with [`set_entry_maker`] stays in effect on the new
/// factory. On error the current default stays in place.
pub fn apply_config(config: &LogConfig) -> Result<()> {
    let factory = Factory::from_config(config)?;
    if let Some(maker) = installed_maker() {
        factory.set_entry_maker(maker);
    }
    install(factory);
    local::set_dev_enabled(config.dev_enabled);
    tracing::info!(
        sink = config.sink.kind.as_deref().unwrap_or_default(),
        pool_capacity = config.pool.capacity,
        dev_enabled = config.dev_enabled,
        "logging configuration applied"
    );
    Ok(())
}

/// The current default factory.
pub fn factory() -> Arc<Factory> {
    DEFAULT.load_full()
}

/// Route the default factory through `maker`.
///
/// The maker outlives reconfiguration through [`apply_config`]; [`init`]
/// drops it.
pub fn set_entry_maker(maker: EntryMaker) {
    if let Ok(mut installed) = ENTRY_MAKER.lock() {
        *installed = Some(maker.clone());
    }
    DEFAULT.load().set_entry_maker(maker);
}

/// Builder on the default factory.
pub fn builder(ctx: &Context) -> Builder {
    factory().builder(ctx)
}

/// See [`Factory::common`].
pub fn common<I, S>(names: I) -> Record
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    factory().common(names)
}

/// See [`Factory::leaf`].
pub fn leaf<I, S>(ctx: &Context, names: I) -> Record
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    factory().leaf(ctx, names)
}

/// See [`Factory::branch`].
pub fn branch<I, S>(ctx: &Context, names: I) -> (Record, Context)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    factory().branch(ctx, names)
}

/// See [`Factory::detach`].
pub fn detach<I, S>(ctx: &Context, names: I) -> (Record, Context)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    factory().detach(ctx, names)
}
