//! Sink forwarding records to the `tracing` subscriber.

use serde_json::Value;

use crate::model::Fields;
use crate::sink::{Level, Sink};

/// Emits each record as a `tracing` event.
///
/// The field map is serialized as a single JSON object under `fields`; the
/// subscriber decides how it is rendered.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink {
    local: bool,
}

impl TracingSink {
    pub fn new() -> Self {
        Self { local: false }
    }

    /// Sink used by the local dev loggers (target `scopelog::local`).
    pub fn local() -> Self {
        Self { local: true }
    }
}

impl Sink for TracingSink {
    fn emit(&self, level: Level, message: &str, fields: &Fields) {
        let rendered = Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        );

        // tracing needs the target and level as constants at each call site
        macro_rules! forward {
            ($target:literal) => {
                match level {
                    Level::Trace => tracing::trace!(target: $target, fields = %rendered, "{}", message),
                    Level::Debug => tracing::debug!(target: $target, fields = %rendered, "{}", message),
                    Level::Info => tracing::info!(target: $target, fields = %rendered, "{}", message),
                    Level::Warn => tracing::warn!(target: $target, fields = %rendered, "{}", message),
                    Level::Error => tracing::error!(target: $target, fields = %rendered, "{}", message),
                }
            };
        }

        if self.local {
            forward!("scopelog::local");
        } else {
            forward!("scopelog::record");
        }
    }
}
