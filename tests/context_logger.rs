use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::Mutex;
use proptest::prelude::*;
use serde_json::{json, Value};

use context_logger::backend::{global_registry, reset_global_registry, set_global_registry};
use context_logger::{
    cx_warning, Backend, BackendRegistry, Context, ContextLogger, Level, MemoryBackend,
    DEFAULT_NAME, NAME_KEY,
};

lazy_static! {
    // Tests that swap the process-wide registry run one at a time.
    static ref GLOBAL_LOCK: Mutex<()> = Mutex::new(());
}

fn isolated_registry() -> (BackendRegistry, MemoryBackend) {
    let sink = MemoryBackend::new("capture");
    let factory_sink = sink.clone();
    let registry =
        BackendRegistry::with_factory(move |_| Arc::new(factory_sink.clone()) as Arc<dyn Backend>);
    (registry, sink)
}

#[test]
fn end_to_end_info_reaches_named_backend() {
    let _guard = GLOBAL_LOCK.lock();

    let svc = MemoryBackend::new("svc");
    let other = MemoryBackend::new("other");
    let registry = BackendRegistry::new();
    registry.insert("svc", svc.clone());
    registry.insert("other", other.clone());
    set_global_registry(registry);

    ContextLogger::new("svc").info("started").unwrap();

    let records = svc.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Info);
    assert!(records[0].text.ends_with("::started"));
    assert!(records[0].text.contains("name: \"svc\""));
    assert!(other.is_empty());

    reset_global_registry();
}

#[test]
fn same_name_shares_global_backend() {
    let _guard = GLOBAL_LOCK.lock();
    reset_global_registry();

    let a = ContextLogger::new("shared");
    let b = ContextLogger::new("shared");

    assert!(Arc::ptr_eq(a.backend(), b.backend()));
    assert!(global_registry().contains("shared"));
}

#[test]
fn inherit_from_logger_copies_context_without_warning() {
    let _guard = GLOBAL_LOCK.lock();
    let (registry, sink) = isolated_registry();
    set_global_registry(registry);

    let mut parent = ContextLogger::default();
    parent.set_context("test", 42).unwrap();

    let mut child = ContextLogger::inherit("new", &parent);
    assert!(sink.is_empty());

    let mut expected = parent.context().clone();
    expected.insert(NAME_KEY, "new");
    assert_eq!(child.context(), &expected);

    child.set_context("test2", 0).unwrap();
    assert!(!parent.context().contains_key("test2"));
    assert_eq!(parent.context().get(NAME_KEY), Some(&json!(DEFAULT_NAME)));

    reset_global_registry();
}

#[test]
fn inherit_from_bare_context() {
    let _guard = GLOBAL_LOCK.lock();
    let (registry, sink) = isolated_registry();
    set_global_registry(registry);

    let source: Context = [("request", json!("abc")), (NAME_KEY, json!("old"))]
        .into_iter()
        .collect();
    let logger = ContextLogger::inherit("worker", &source);

    assert_eq!(logger.context().get("request"), Some(&json!("abc")));
    assert_eq!(logger.context().get(NAME_KEY), Some(&json!("worker")));
    assert_eq!(source.get(NAME_KEY), Some(&json!("old")));
    assert!(sink.is_empty());

    reset_global_registry();
}

#[test]
fn duplicate_key_warning_carries_old_context() {
    let (registry, sink) = isolated_registry();
    let mut logger = ContextLogger::with_registry(&registry, "svc", None);

    logger.set_context("attempt", 1).unwrap();
    logger.set_context("attempt", 2).unwrap();
    cx_warning!(logger, "retrying in {}s", 5).unwrap();

    let texts = sink.texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(
        texts[0],
        "{attempt: 1, name: \"svc\"}::Setting existing key in context, key=attempt with value=1 -> 2"
    );
    assert_eq!(texts[1], "{attempt: 2, name: \"svc\"}::retrying in 5s");
    assert_eq!(sink.count_at(Level::Warning), 2);
}

fn context_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
        ("[a-z]{1,6}", any::<i32>())
            .prop_map(|(k, v)| Value::Object([(k, Value::from(v))].into_iter().collect())),
    ]
}

proptest! {
    #[test]
    fn name_is_always_in_context(name in "[a-zA-Z][a-zA-Z0-9_.]{0,15}") {
        let (registry, _) = isolated_registry();
        let logger = ContextLogger::with_registry(&registry, name.clone(), None);
        prop_assert_eq!(logger.context().get(NAME_KEY), Some(&json!(name)));
    }

    #[test]
    fn set_then_get_returns_value(key in "[a-z]{1,8}", value in context_value()) {
        prop_assume!(key != NAME_KEY);
        let (registry, sink) = isolated_registry();
        let mut logger = ContextLogger::with_registry(&registry, DEFAULT_NAME, None);

        logger.set_context(key.clone(), value.clone()).unwrap();

        prop_assert_eq!(logger.context().get(&key), Some(&value));
        prop_assert!(sink.is_empty());
    }

    #[test]
    fn overwrite_warns_exactly_once(key in "[a-z]{1,8}", old in any::<i32>(), new in any::<i32>()) {
        prop_assume!(key != NAME_KEY);
        let (registry, sink) = isolated_registry();
        let mut logger = ContextLogger::with_registry(&registry, DEFAULT_NAME, None);

        logger.set_context(key.clone(), old).unwrap();
        logger.set_context(key.clone(), new).unwrap();

        let records = sink.records();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].level, Level::Warning);
        let expected = format!("value={} -> {}", old, new);
        prop_assert!(records[0].text.contains(&expected));
    }

    #[test]
    fn rendering_ignores_insertion_order(
        entries in proptest::collection::btree_map("[a-z]{1,6}", context_value(), 0..8)
    ) {
        let forward: Context = entries.clone().into_iter().collect();
        let backward: Context = entries.into_iter().rev().collect();
        prop_assert_eq!(forward.to_string(), backward.to_string());
    }
}
