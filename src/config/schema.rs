//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! every field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether local (dev) loggers emit.
    pub dev_enabled: bool,

    /// Sink used by the default factory.
    pub sink: SinkConfig,

    /// Builder pool settings.
    pub pool: PoolConfig,

    /// Diagnostic logging of the crate itself.
    pub logging: LoggingConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dev_enabled: true,
            sink: SinkConfig::default(),
            pool: PoolConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Sink selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SinkConfig {
    /// One of `tracing` or `discard`. Absent means no sink.
    pub kind: Option<String>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: Some("tracing".to_string()),
        }
    }
}

/// Builder pool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum idle builder states kept for reuse.
    pub capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// Subscriber settings for `observability::logging`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,

    /// Colored output.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "scopelog=info".to_string(),
            ansi: true,
        }
    }
}
