//! The storage seam between the engine and the host framework's session.

use crate::value::Payload;

/// Synchronous key-value view of the host framework's session.
///
/// This is the only storage interface the engine touches. It is request
/// scoped and never concurrently mutated within one request/render cycle, so
/// implementations need no locking of their own. The engine assumes nothing
/// beyond read-after-write consistency within a cycle; persistence across
/// requests is entirely the session's concern.
///
/// The `flashbox-memory` crate provides the in-process implementation;
/// framework adapters wrap their own session object in this trait.
pub trait SessionStore {
    /// Reads the value stored under `slot`, if any.
    fn get(&self, slot: &str) -> Option<Payload>;

    /// Stores `value` under `slot`, replacing any previous value.
    fn set(&mut self, slot: &str, value: Payload);

    /// Removes and returns the value stored under `slot`, if any.
    fn remove(&mut self, slot: &str) -> Option<Payload>;
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn get(&self, slot: &str) -> Option<Payload> {
        (**self).get(slot)
    }

    fn set(&mut self, slot: &str, value: Payload) {
        (**self).set(slot, value)
    }

    fn remove(&mut self, slot: &str) -> Option<Payload> {
        (**self).remove(slot)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn get(&self, slot: &str) -> Option<Payload> {
        (**self).get(slot)
    }

    fn set(&mut self, slot: &str, value: Payload) {
        (**self).set(slot, value)
    }

    fn remove(&mut self, slot: &str) -> Option<Payload> {
        (**self).remove(slot)
    }
}
