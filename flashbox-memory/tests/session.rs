use pretty_assertions::assert_eq;
use serde_json::json;

use flashbox_core::SessionStore;
use flashbox_memory::MemorySession;

#[test]
fn test_read_after_write() {
    let mut session = MemorySession::new();
    assert_eq!(session.get("_flash"), None);

    session.set("_flash", json!(["a", "b"]));
    assert_eq!(session.get("_flash"), Some(json!(["a", "b"])));

    session.set("_flash", json!("overwritten"));
    assert_eq!(session.get("_flash"), Some(json!("overwritten")));
    assert_eq!(session.len(), 1);
}

#[test]
fn test_remove_returns_previous_value() {
    let mut session = MemorySession::new();
    session.set("_flash", json!({"k": 1}));

    assert_eq!(session.remove("_flash"), Some(json!({"k": 1})));
    assert_eq!(session.remove("_flash"), None);
    assert!(session.is_empty());
}

#[test]
fn test_slots_are_independent() {
    let mut session = MemorySession::new();
    session.set("_flash", json!("flash"));
    session.set("user", json!("alice"));

    session.remove("_flash");
    assert!(!session.contains("_flash"));
    assert_eq!(session.get("user"), Some(json!("alice")));
}
