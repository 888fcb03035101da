//! Shared utilities for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use scopelog::sink::MemorySink;
use scopelog::{Chain, Column, Columns, Context, EntrySource, Factory};

/// A factory writing into a fresh in-memory sink.
#[allow(dead_code)]
pub fn memory_factory() -> (Arc<Factory>, Arc<MemorySink>) {
    let sink = MemorySink::new();
    let factory = Factory::with_source(EntrySource::Sink(sink.clone()));
    (factory, sink)
}

/// Context holding chain `["svc"]` and columns `{env: "prod"}`.
#[allow(dead_code)]
pub fn service_context() -> Context {
    Context::background()
        .with_chain(Chain::new(["svc"]))
        .with_columns(Columns::from(vec![Column::new("env", "prod")]))
}

/// A unique scratch file path under the system temp dir.
#[allow(dead_code)]
pub fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("scopelog-{}-{}", std::process::id(), name))
}
