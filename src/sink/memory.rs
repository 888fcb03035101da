//! In-memory and discarding sinks.

use std::sync::{Arc, Mutex};

use crate::model::Fields;
use crate::sink::{Level, Sink};

/// A record captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedRecord {
    pub level: Level,
    pub message: String,
    pub fields: Fields,
}

/// Keeps every emitted record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<EmittedRecord>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of the records captured so far.
    pub fn records(&self) -> Vec<EmittedRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Remove and return the captured records.
    pub fn drain(&self) -> Vec<EmittedRecord> {
        self.records
            .lock()
            .map(|mut records| std::mem::take(&mut *records))
            .unwrap_or_default()
    }
}

impl Sink for MemorySink {
    fn emit(&self, level: Level, message: &str, fields: &Fields) {
        if let Ok(mut records) = self.records.lock() {
            records.push(EmittedRecord {
                level,
                message: message.to_string(),
                fields: fields.clone(),
            });
        }
    }
}

/// Drops every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl Sink for DiscardSink {
    fn emit(&self, _level: Level, _message: &str, _fields: &Fields) {}
}
