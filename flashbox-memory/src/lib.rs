#![warn(missing_docs)]
//! In-memory session store for Flashbox.
//!
//! [`MemorySession`] keeps session slots in an insertion-ordered map and
//! implements the synchronous [`SessionStore`] trait. It is the store used
//! by the workspace's tests and demos and is suitable for single-process
//! applications.
//!
//! # Caveats
//!
//! - Data is **not persisted** — the session is lost on process restart
//! - Data is **not shared** across processes — wrap your framework's own
//!   session in [`SessionStore`] for anything distributed

use indexmap::IndexMap;
use smol_str::SmolStr;

use flashbox_core::{Payload, SessionStore};

/// Request-scoped in-memory session.
///
/// # Example
///
/// ```
/// use flashbox_core::SessionStore;
/// use flashbox_memory::MemorySession;
/// use serde_json::json;
///
/// let mut session = MemorySession::new();
/// session.set("_flash", json!({"error": "boom"}));
/// assert_eq!(session.get("_flash"), Some(json!({"error": "boom"})));
/// assert_eq!(session.remove("_flash"), Some(json!({"error": "boom"})));
/// assert_eq!(session.get("_flash"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySession {
    slots: IndexMap<SmolStr, Payload>,
}

impl MemorySession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the session holds no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a slot is present under `slot`.
    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }
}

impl SessionStore for MemorySession {
    fn get(&self, slot: &str) -> Option<Payload> {
        self.slots.get(slot).cloned()
    }

    fn set(&mut self, slot: &str, value: Payload) {
        self.slots.insert(SmolStr::new(slot), value);
    }

    fn remove(&mut self, slot: &str) -> Option<Payload> {
        self.slots.shift_remove(slot)
    }
}
