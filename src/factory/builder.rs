//! Per-call builder façade.

use std::sync::Arc;

use serde_json::Value;

use crate::context::Context;
use crate::factory::pool::BuilderState;
use crate::factory::record::{Record, KEY_FINGERPRINT};
use crate::factory::Factory;
use crate::model::{Chain, Columns, Fields};
use crate::observability::metrics;
use crate::propagation::{lineage, propagate, Strategy};
use crate::sink::Entry;

/// Collects a strategy, fingerprint fragment and field fragment, then
/// resolves them against a context exactly once.
///
/// The fragment buffers come from the factory's pool and go back to it when
/// the builder is built or dropped.
#[derive(Debug)]
pub struct Builder {
    factory: Arc<Factory>,
    ctx: Context,
    state: Option<BuilderState>,
}

impl Builder {
    pub(crate) fn new(factory: Arc<Factory>, ctx: Context) -> Self {
        let state = factory.pool().acquire();
        Self {
            factory,
            ctx,
            state: Some(state),
        }
    }

    /// Set the fingerprint fragment, replacing any previous one.
    pub fn name<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state = self.state_mut();
        state.names.clear();
        state.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add one field to the fragment.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.state_mut().columns.insert(key, value);
        self
    }

    /// Add several fields to the fragment.
    pub fn fields(mut self, fields: Fields) -> Self {
        self.state_mut().columns.set_mut(Columns::from_fields(fields));
        self
    }

    /// Choose how the fragment relates to the context.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.state_mut().strategy = strategy;
        self
    }

    /// Fragment collected so far.
    pub fn state(&self) -> Option<&BuilderState> {
        self.state.as_ref()
    }

    /// Resolve the fragment and produce the record and outgoing context.
    ///
    /// Never fails: if the factory cannot make an entry the record goes to a
    /// discarding sink.
    pub fn build(mut self) -> (Record, Context) {
        let state = self.state.take().unwrap_or_default();
        let strategy = state.strategy;
        let fragment = Chain::new(state.names.iter().cloned());
        let propagation = propagate(&self.ctx, &fragment, &state.columns, strategy);
        self.factory.pool().release(state);

        let entry = self.factory.make_entry(&self.ctx).unwrap_or_else(|| {
            tracing::debug!(strategy = %strategy, "entry maker returned nothing, record discarded");
            Entry::discard()
        });
        let entry = match lineage::from_context(&self.ctx) {
            Some(cached) => lineage::insert(entry, cached.segments()),
            None => entry,
        };
        let entry = entry
            .with_fields(propagation.columns.to_flat_map())
            .with_field(KEY_FINGERPRINT, propagation.chain.render());

        metrics::record_built(strategy);
        (Record::new(entry, propagation.chain), propagation.context)
    }

    /// Build with [`Strategy::ForkLeaf`]; the context is left as is.
    pub fn leaf(self) -> Record {
        self.strategy(Strategy::ForkLeaf).build().0
    }

    /// Build with [`Strategy::ForkBranch`].
    pub fn branch(self) -> (Record, Context) {
        self.strategy(Strategy::ForkBranch).build()
    }

    /// Build with [`Strategy::NewTree`].
    pub fn detach(self) -> (Record, Context) {
        self.strategy(Strategy::NewTree).build()
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        self.state.get_or_insert_with(BuilderState::default)
    }
}

impl Drop for Builder {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.factory.pool().release(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::EntrySource;
    use crate::propagation::lineage::{KEY_LINEAGE_FP, KEY_METHOD};
    use crate::sink::MemorySink;
    use serde_json::json;

    fn memory_factory() -> (Arc<Factory>, Arc<MemorySink>) {
        let sink = MemorySink::new();
        let factory = Factory::with_source(EntrySource::Sink(sink.clone()));
        (factory, sink)
    }

    #[test]
    fn test_build_attaches_chain_and_columns() {
        let (factory, sink) = memory_factory();
        let ctx = Context::background();

        let (record, _) = factory
            .builder(&ctx)
            .name(["svc", "op"])
            .field("req", "42")
            .build();
        record.info("handled");

        let emitted = sink.records();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].fields[KEY_FINGERPRINT], json!("/svc/op"));
        assert_eq!(emitted[0].fields["req"], json!("42"));
        assert_eq!(record.chain().segments(), ["svc", "op"]);
    }

    #[test]
    fn test_pool_does_not_leak_between_calls() {
        let (factory, _sink) = memory_factory();
        let ctx = Context::background();

        let (first, _) = factory.builder(&ctx).name(["x"]).field("k", 1).build();
        assert_eq!(first.chain().render(), "/x");
        assert_eq!(factory.pool().idle(), 1);

        let builder = factory.builder(&ctx);
        assert!(builder.state().is_some_and(BuilderState::is_clean));
        let (second, _) = builder.build();
        assert!(second.chain().is_empty());
        assert!(!second.fields().contains_key("k"));
    }

    #[test]
    fn test_dropped_builder_returns_state() {
        let (factory, _sink) = memory_factory();
        let builder = factory.builder(&Context::background()).name(["x"]);
        assert_eq!(factory.pool().idle(), 0);
        drop(builder);
        assert_eq!(factory.pool().idle(), 1);
    }

    #[test]
    fn test_name_replaces_fragment() {
        let (factory, _sink) = memory_factory();
        let record = factory
            .builder(&Context::background())
            .name(["a", "b"])
            .name(["c"])
            .leaf();
        assert_eq!(record.chain().render(), "/c");
    }

    #[test]
    fn test_fields_merge_into_fragment() {
        let (factory, _sink) = memory_factory();
        let mut fields = Fields::new();
        fields.insert("a".into(), json!(1));
        fields.insert("b".into(), json!(2));

        let record = factory
            .builder(&Context::background())
            .field("a", 0)
            .fields(fields)
            .leaf();
        assert_eq!(record.fields()["a"], json!(1));
        assert_eq!(record.fields()["b"], json!(2));
    }

    #[test]
    fn test_missing_entry_gives_noop_record() {
        let factory = Factory::with_source(EntrySource::Maker(Arc::new(|_: &Context| -> Option<Entry> { None })));
        let (record, ctx) = factory.builder(&Context::background()).name(["x"]).branch();
        record.info("goes nowhere");
        assert_eq!(record.fields()[KEY_FINGERPRINT], json!("/x"));
        assert_eq!(ctx.chain().unwrap().render(), "/x");
    }

    #[test]
    fn test_cached_lineage_is_spliced() {
        let (factory, _sink) = memory_factory();
        let ctx = Context::background();

        let record = factory.builder(&ctx).leaf().with_fp_appends(["handler", "step"]);
        let released = record.release(&ctx);

        // no caller-side chain, lineage still shows up
        let next = factory.builder(&released).leaf();
        assert_eq!(next.fields()[KEY_METHOD], json!("handler"));
        assert_eq!(next.fields()[KEY_LINEAGE_FP], json!(["step"]));
        assert!(next.chain().is_empty());
    }
}
