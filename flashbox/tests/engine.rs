use pretty_assertions::assert_eq;
use serde_json::json;

use flashbox::{
    ArgumentStyle, FlashEngine, FlashError, FlashPolicy, FlashState, Flushed, QueueStyle,
    SessionStore,
};
use flashbox_memory::MemorySession;

fn engine(queue: QueueStyle, arguments: ArgumentStyle) -> FlashEngine {
    let policy = FlashPolicy::builder()
        .queue(queue)
        .arguments(arguments)
        .dequeue(flashbox::DequeueStyle::Never)
        .build()
        .unwrap();
    FlashEngine::new(policy)
}

#[test]
fn test_default_scenario() {
    // Defaults: queue=key_single, arguments=join, dequeue=by_key.
    let engine = FlashEngine::new(FlashPolicy::default());
    let mut session = MemorySession::new();

    let stored = engine
        .set(&mut session, Some("foo"), &[json!("bar")])
        .unwrap();
    assert_eq!(stored, json!("bar"));

    assert_eq!(
        engine.flush(&mut session, &["foo"]).unwrap(),
        Flushed::One(json!("bar"))
    );
    assert_eq!(engine.flush(&mut session, &["foo"]).unwrap(), Flushed::None);
}

#[test]
fn test_single_queue_overwrites() {
    let engine = engine(QueueStyle::Single, ArgumentStyle::Single);
    let mut session = MemorySession::new();

    engine.set(&mut session, None, &[json!("a")]).unwrap();
    engine.set(&mut session, None, &[json!("b")]).unwrap();

    assert_eq!(
        engine.flush(&mut session, &[]).unwrap(),
        Flushed::All(FlashState::Single(json!("b")))
    );
}

#[test]
fn test_multiple_queue_appends_in_order() {
    let engine = engine(QueueStyle::Multiple, ArgumentStyle::Single);
    let mut session = MemorySession::new();

    engine.set(&mut session, None, &[json!("a")]).unwrap();
    engine.set(&mut session, None, &[json!("b")]).unwrap();
    engine.set(&mut session, None, &[json!("c")]).unwrap();

    assert_eq!(
        engine.flush(&mut session, &[]).unwrap(),
        Flushed::All(FlashState::Multiple(vec![
            json!("a"),
            json!("b"),
            json!("c")
        ]))
    );
}

#[test]
fn test_key_single_overwrites_per_key() {
    let engine = engine(QueueStyle::KeySingle, ArgumentStyle::Single);
    let mut session = MemorySession::new();

    engine.set(&mut session, Some("k"), &[json!("a")]).unwrap();
    engine.set(&mut session, Some("k"), &[json!("b")]).unwrap();

    let Flushed::All(state) = engine.flush(&mut session, &[]).unwrap() else {
        panic!("expected the whole state");
    };
    assert_eq!(state.get_key("k"), Some(json!("b")));
}

#[test]
fn test_key_multiple_appends_per_key() {
    let engine = engine(QueueStyle::KeyMultiple, ArgumentStyle::Single);
    let mut session = MemorySession::new();

    engine.set(&mut session, Some("k"), &[json!("a")]).unwrap();
    engine.set(&mut session, Some("k"), &[json!("b")]).unwrap();

    let Flushed::All(state) = engine.flush(&mut session, &[]).unwrap() else {
        panic!("expected the whole state");
    };
    assert_eq!(state.get_key("k"), Some(json!(["a", "b"])));
}

#[test]
fn test_join_shaping_under_multiple_queue() {
    let engine = engine(QueueStyle::Multiple, ArgumentStyle::Join);
    let mut session = MemorySession::new();

    engine
        .set(&mut session, None, &[json!("hey"), json!("you!")])
        .unwrap();

    assert_eq!(
        engine.flush(&mut session, &[]).unwrap(),
        Flushed::All(FlashState::Multiple(vec![json!("heyyou!")]))
    );
}

#[test]
fn test_array_shaping_always_wraps() {
    let engine = engine(QueueStyle::Single, ArgumentStyle::Array);
    let mut session = MemorySession::new();

    let stored = engine.set(&mut session, None, &[json!("whatever")]).unwrap();
    assert_eq!(stored, json!(["whatever"]));
}

#[test]
fn test_auto_shaping() {
    let engine = engine(QueueStyle::Multiple, ArgumentStyle::Auto);
    let mut session = MemorySession::new();

    engine.set(&mut session, None, &[json!("one")]).unwrap();
    engine
        .set(&mut session, None, &[json!("a"), json!("b")])
        .unwrap();

    assert_eq!(
        engine.flush(&mut session, &[]).unwrap(),
        Flushed::All(FlashState::Multiple(vec![
            json!("one"),
            json!(["a", "b"])
        ]))
    );
}

#[test]
fn test_set_returns_shaped_value_for_chaining() {
    let engine = FlashEngine::new(FlashPolicy::default());
    let mut session = MemorySession::new();

    let stored = engine
        .set(&mut session, Some("notice"), &[json!("saved"), json!("!")])
        .unwrap();
    assert_eq!(stored, json!("saved!"));
}

#[test]
fn test_missing_key_under_keyed_queue() {
    let engine = FlashEngine::new(FlashPolicy::default());
    let mut session = MemorySession::new();

    let err = engine.set(&mut session, None, &[json!("x")]).unwrap_err();
    assert_eq!(
        err,
        FlashError::MissingKey {
            queue: QueueStyle::KeySingle
        }
    );
    assert!(!session.contains("_flash"));
}

#[test]
fn test_leading_key_is_a_value_under_non_keyed_queue() {
    let engine = engine(QueueStyle::Multiple, ArgumentStyle::Join);
    let mut session = MemorySession::new();

    // The classic variadic interface: the first positional argument is only
    // a key when the store is keyed.
    engine
        .set(&mut session, Some("hey"), &[json!("you!")])
        .unwrap();

    assert_eq!(
        engine.flush(&mut session, &[]).unwrap(),
        Flushed::All(FlashState::Multiple(vec![json!("heyyou!")]))
    );
}

#[test]
fn test_flush_all_clears_and_is_idempotent() {
    for queue in [
        QueueStyle::Single,
        QueueStyle::Multiple,
        QueueStyle::KeySingle,
        QueueStyle::KeyMultiple,
    ] {
        let engine = engine(queue, ArgumentStyle::Single);
        let mut session = MemorySession::new();
        let key = queue.is_keyed().then_some("k");

        engine.set(&mut session, key, &[json!("a")]).unwrap();

        assert!(matches!(
            engine.flush(&mut session, &[]).unwrap(),
            Flushed::All(_)
        ));
        assert!(!session.contains("_flash"));
        assert_eq!(engine.flush(&mut session, &[]).unwrap(), Flushed::None);
    }
}

#[test]
fn test_flush_on_empty_store() {
    let engine = FlashEngine::new(FlashPolicy::default());
    let mut session = MemorySession::new();

    assert_eq!(engine.flush(&mut session, &[]).unwrap(), Flushed::None);
    assert_eq!(engine.flush(&mut session, &["foo"]).unwrap(), Flushed::None);
    assert_eq!(
        engine.flush(&mut session, &["a", "b"]).unwrap(),
        Flushed::Many(vec![None, None])
    );
}

#[test]
fn test_partial_flush_leaves_other_keys() {
    let engine = FlashEngine::new(FlashPolicy::default());
    let mut session = MemorySession::new();

    engine
        .set(&mut session, Some("error"), &[json!("boom")])
        .unwrap();
    engine
        .set(&mut session, Some("warning"), &[json!("careful")])
        .unwrap();

    assert_eq!(
        engine.flush(&mut session, &["error"]).unwrap(),
        Flushed::One(json!("boom"))
    );
    assert_eq!(
        session.get("_flash"),
        Some(json!({"warning": "careful"}))
    );
}

#[test]
fn test_multi_key_flush_in_request_order() {
    let engine = FlashEngine::new(FlashPolicy::default());
    let mut session = MemorySession::new();

    engine.set(&mut session, Some("a"), &[json!(1)]).unwrap();
    engine.set(&mut session, Some("b"), &[json!(2)]).unwrap();

    assert_eq!(
        engine.flush(&mut session, &["b", "missing", "a"]).unwrap(),
        Flushed::Many(vec![Some(json!(2)), None, Some(json!(1))])
    );
}

#[test]
fn test_keyed_flush_under_non_keyed_queue_fails() {
    let engine = engine(QueueStyle::Multiple, ArgumentStyle::Single);
    let mut session = MemorySession::new();

    engine.set(&mut session, None, &[json!("a")]).unwrap();
    let err = engine.flush(&mut session, &["a"]).unwrap_err();
    assert_eq!(
        err,
        FlashError::KeyedFlush {
            queue: QueueStyle::Multiple
        }
    );

    // Nothing was cleared by the failed call.
    assert_eq!(session.get("_flash"), Some(json!(["a"])));
}

#[test]
fn test_corrupt_slot_surfaces_on_read() {
    let engine = engine(QueueStyle::Multiple, ArgumentStyle::Single);
    let mut session = MemorySession::new();
    session.set("_flash", json!(5));

    let err = engine.set(&mut session, None, &[json!("a")]).unwrap_err();
    assert_eq!(
        err,
        FlashError::CorruptSlot {
            queue: QueueStyle::Multiple
        }
    );
}

#[test]
fn test_flush_round_trip_reconstructs_merged_state() {
    let engine = engine(QueueStyle::KeyMultiple, ArgumentStyle::Single);
    let mut session = MemorySession::new();

    engine
        .set(&mut session, Some("error"), &[json!("boom")])
        .unwrap();
    engine
        .set(&mut session, Some("notice"), &[json!("saved")])
        .unwrap();
    engine
        .set(&mut session, Some("error"), &[json!("again")])
        .unwrap();

    let flushed = engine.flush(&mut session, &[]).unwrap();
    assert_eq!(
        flushed.into_payload(),
        Some(json!({"error": ["boom", "again"], "notice": ["saved"]}))
    );
}
