//! End-to-end propagation through builders, factories and the global default.

use std::sync::Arc;

use scopelog::factory::record::KEY_FINGERPRINT;
use scopelog::global::local::KEY_LOCAL_METHOD;
use scopelog::global::{self, LocalMethod};
use scopelog::propagation::lineage::KEY_METHOD;
use scopelog::sink::MemorySink;
use scopelog::{Context, Entry, EntrySource, Factory, Level, Strategy};
use serde_json::json;
use serial_test::serial;

mod common;

#[test]
fn test_fork_leaf_scenario() {
    let (factory, sink) = common::memory_factory();
    let ctx = common::service_context();

    let (record, returned) = factory
        .builder(&ctx)
        .name(["op"])
        .field("req", "42")
        .strategy(Strategy::ForkLeaf)
        .build();
    record.info("leaf");

    let emitted = sink.drain();
    assert_eq!(emitted[0].fields[KEY_FINGERPRINT], json!("/svc/op"));
    assert_eq!(emitted[0].fields["env"], json!("prod"));
    assert_eq!(emitted[0].fields["req"], json!("42"));

    assert!(Context::ptr_eq(&returned, &ctx));
    assert_eq!(returned.chain().unwrap().render(), "/svc");
}

#[test]
fn test_fork_branch_scenario() {
    let (factory, _sink) = common::memory_factory();
    let ctx = common::service_context();

    let (record, returned) = factory
        .builder(&ctx)
        .name(["op"])
        .field("req", "42")
        .branch();

    assert_eq!(record.fields()[KEY_FINGERPRINT], json!("/svc/op"));
    assert_eq!(returned.chain().unwrap().render(), "/svc/op");
    let stored = returned.columns().unwrap();
    assert_eq!(stored.get("env"), Some(&json!("prod")));
    assert_eq!(stored.get("req"), Some(&json!("42")));

    // descendants inherit, siblings from the original context don't
    let child = factory.leaf(&returned, ["child"]);
    assert_eq!(child.chain().render(), "/svc/op/child");
    assert_eq!(child.fields()["req"], json!("42"));
    let sibling = factory.leaf(&ctx, ["sibling"]);
    assert!(!sibling.fields().contains_key("req"));
}

#[test]
fn test_new_tree_scenario() {
    let (factory, _sink) = common::memory_factory();
    let ctx = common::service_context();

    let (record, returned) = factory.detach(&ctx, ["op2"]);

    assert_eq!(record.chain().render(), "/op2");
    assert!(!record.fields().contains_key("env"));
    assert_eq!(returned.chain().unwrap().render(), "/op2");

    let after = factory.leaf(&returned, ["x"]);
    assert_eq!(after.chain().render(), "/op2/x");
    assert!(!after.fields().contains_key("env"));
}

#[test]
fn test_branch_detach_release_flow() {
    let (factory, _sink) = common::memory_factory();
    let ctx = Context::background();

    let (_, ctx1) = factory.branch(&ctx, ["l1"]);
    let (_, ctx2) = factory.branch(&ctx1, ["l2"]);
    let (l3, ctx3) = factory.detach(&ctx2, ["l3"]);
    let (l4, _) = factory.detach(&ctx3, ["l4"]);

    assert_eq!(factory.leaf(&ctx2, ["leaf"]).chain().render(), "/l1/l2/leaf");
    assert_eq!(l3.chain().render(), "/l3");
    assert_eq!(l4.chain().render(), "/l4");

    // carry lineage across the detached tree back to the original context
    let l3 = l3.with_fp_appends(["worker", "tick"]);
    let carried = l3.release(&ctx);
    let next = factory.common(std::iter::empty::<String>());
    assert_eq!(next.fields()[KEY_METHOD], json!("-"));
    let next = factory.leaf(&carried, ["resumed"]);
    assert_eq!(next.fields()[KEY_METHOD], json!("worker"));
    assert_eq!(next.chain().render(), "/resumed");
}

#[test]
fn test_pool_reuse_through_factory() {
    let (factory, _sink) = common::memory_factory();
    let ctx = Context::background();

    for _ in 0..10 {
        let record = factory.builder(&ctx).name(["x"]).field("k", "v").leaf();
        assert_eq!(record.chain().render(), "/x");
        let clean = factory.builder(&ctx).leaf();
        assert_eq!(clean.chain().render(), "/");
        assert!(!clean.fields().contains_key("k"));
    }
    assert_eq!(factory.pool().idle(), 1);
}

#[test]
fn test_records_shared_across_threads() {
    let (factory, sink) = common::memory_factory();
    let (_, ctx) = factory.branch(&Context::background(), ["svc"]);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let factory = factory.clone();
            let ctx = ctx.clone();
            std::thread::spawn(move || {
                let (log, _) = factory.branch(&ctx, [format!("worker{i}")]);
                log.warn("working");
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let emitted = sink.records();
    assert_eq!(emitted.len(), 4);
    assert!(emitted.iter().all(|r| r.level == Level::Warn));
    assert_eq!(ctx.chain().unwrap().render(), "/svc");
}

#[test]
#[serial]
fn test_global_default_swap() {
    let sink = MemorySink::new();
    global::init(Factory::with_source(EntrySource::Sink(sink.clone())));

    let (log, ctx) = global::branch(&Context::background(), ["svc"]);
    log.info("branch");
    global::leaf(&ctx, ["op"]).info("leaf");
    global::common(["plain"]).info("common");

    let emitted = sink.drain();
    let fps: Vec<_> = emitted.iter().map(|r| r.fields[KEY_FINGERPRINT].clone()).collect();
    assert_eq!(fps, vec![json!("/svc"), json!("/svc/op"), json!("/plain")]);

    global::set_entry_maker(Arc::new(move |_: &Context| {
        Some(Entry::new(sink.clone()).with_field("tenant", "t1"))
    }));
    let record = global::builder(&Context::background()).leaf();
    assert_eq!(record.fields()["tenant"], json!("t1"));

    global::init(Factory::with_source(EntrySource::Sink(Arc::new(
        scopelog::sink::DiscardSink,
    ))));
}

#[test]
#[serial]
fn test_dev_flag_toggles_local_sink() {
    global::set_dev_enabled(false);
    assert!(!global::dev_enabled());
    let quiet = LocalMethod::Dev.log(["quiet"]);
    assert_eq!(quiet.chain().render(), "/quiet");
    assert_eq!(format!("{:?}", quiet.sink()), "DiscardSink");
    assert_eq!(format!("{:?}", quiet.dev().sink()), "DiscardSink");

    global::set_dev_enabled(true);
    let loud = LocalMethod::Dev.log(["loud"]);
    assert_eq!(loud.chain().render(), "/loud");
    assert_eq!(format!("{:?}", loud.sink()), "TracingSink { local: true }");
    assert_eq!(loud.fields()[KEY_LOCAL_METHOD], json!("dev"));

    let togglers: Vec<_> = (0..4)
        .map(|i| std::thread::spawn(move || global::set_dev_enabled(i % 2 == 0)))
        .collect();
    for toggler in togglers {
        toggler.join().unwrap();
    }

    global::set_dev_enabled(true);
    assert!(global::dev_enabled());
}

#[test]
#[serial]
fn test_apply_config_rejects_bad_sink() {
    let before = global::factory();

    let mut config = scopelog::LogConfig::default();
    config.sink.kind = Some("carrier-pigeon".into());
    let err = global::apply_config(&config).unwrap_err();
    assert!(matches!(err, scopelog::Error::ArgumentTypeMismatch { .. }));
    assert!(Arc::ptr_eq(&before, &global::factory()));

    config.sink.kind = None;
    assert!(matches!(
        global::apply_config(&config),
        Err(scopelog::Error::MissingSink)
    ));

    config.sink.kind = Some("discard".into());
    config.dev_enabled = true;
    global::apply_config(&config).unwrap();
    assert!(!Arc::ptr_eq(&before, &global::factory()));
}

#[test]
#[serial]
fn test_entry_maker_survives_reconfigure() {
    let sink = MemorySink::new();
    let maker_sink = sink.clone();
    global::set_entry_maker(Arc::new(move |_: &Context| {
        Some(Entry::new(maker_sink.clone()).with_field("tenant", "t1"))
    }));

    let mut config = scopelog::LogConfig::default();
    config.sink.kind = Some("discard".into());
    global::apply_config(&config).unwrap();

    global::common(["after_reload"]).info("still routed");
    let emitted = sink.drain();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].fields["tenant"], json!("t1"));

    // an explicit factory replaces the maker for good
    global::init(Factory::with_source(EntrySource::Sink(Arc::new(
        scopelog::sink::DiscardSink,
    ))));
    global::apply_config(&config).unwrap();
    global::common(["plain"]).info("dropped");
    assert!(sink.drain().is_empty());
    assert!(matches!(*global::factory().source(), EntrySource::Sink(_)));
}
