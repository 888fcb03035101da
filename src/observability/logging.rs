//! Diagnostic logging for the crate itself.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries and tests
//! - Apply the configured filter, overridable through `RUST_LOG`
//!
//! # Design Decisions
//! - Uses the tracing crate; `TracingSink` records land in the same subscriber
//! - Initialization is idempotent: a second call keeps the first subscriber

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Install the global subscriber. Returns false if one was already set.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.filter.as_str().into());

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.ansi {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_ansi(false))
            .try_init()
    };

    result.is_ok()
}
