//! Log entries handed out by the factory.

use std::sync::Arc;

use serde_json::Value;

use crate::model::Fields;
use crate::observability::metrics;
use crate::sink::{DiscardSink, Level, Sink};

/// A pending record: the sink it will go to plus its fields.
///
/// `with_*` methods consume and return the entry; clone first to keep the
/// original.
#[derive(Debug, Clone)]
pub struct Entry {
    sink: Arc<dyn Sink>,
    data: Fields,
}

impl Entry {
    /// Create an entry without fields.
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            sink,
            data: Fields::new(),
        }
    }

    /// An entry that drops everything written to it.
    pub fn discard() -> Self {
        Self::new(Arc::new(DiscardSink))
    }

    /// Attach one field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Attach several fields; incoming values win on collision.
    pub fn with_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.data.extend(fields);
        self
    }

    /// Fields attached so far.
    pub fn data(&self) -> &Fields {
        &self.data
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Send the entry to its sink.
    pub fn log(&self, level: Level, message: &str) {
        metrics::record_emitted(level);
        self.sink.emit(level, message, &self.data);
    }

    pub fn trace(&self, message: &str) {
        self.log(Level::Trace, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use serde_json::json;

    #[test]
    fn test_with_fields_overrides() {
        let sink = MemorySink::new();
        let entry = Entry::new(sink.clone())
            .with_field("a", 1)
            .with_fields([("a".to_string(), json!(2)), ("b".to_string(), json!("x"))]);

        assert_eq!(entry.data()["a"], json!(2));
        entry.info("hello");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "hello");
        assert_eq!(records[0].level, Level::Info);
        assert_eq!(records[0].fields["b"], json!("x"));
    }

    #[test]
    fn test_clone_is_independent() {
        let base = Entry::discard().with_field("a", 1);
        let derived = base.clone().with_field("b", 2);
        assert!(!base.data().contains_key("b"));
        assert!(derived.data().contains_key("a"));
    }
}
