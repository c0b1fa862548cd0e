//! The flash policy engine.

use tracing::debug;

use flashbox_core::{FlashError, FlashPolicy, FlashState, Payload, SessionStore};

use crate::cycle::RenderCycle;
use crate::shape::shape_values;

/// Session-backed flash-message policy engine.
///
/// The engine is a stateless policy object: every operation takes the
/// caller's session explicitly and leaves all mutable state there. One
/// engine is typically constructed at application startup and shared for the
/// life of the process.
///
/// Because [`FlashPolicy`] validates its style combination at build time, a
/// constructed engine never has to re-check configuration at call time.
///
/// # Example
///
/// ```
/// use flashbox::{FlashEngine, FlashPolicy, Flushed};
/// use flashbox_memory::MemorySession;
/// use serde_json::json;
///
/// let engine = FlashEngine::new(FlashPolicy::default());
/// let mut session = MemorySession::new();
///
/// let stored = engine.set(&mut session, Some("foo"), &[json!("bar")]).unwrap();
/// assert_eq!(stored, json!("bar"));
///
/// assert_eq!(engine.flush(&mut session, &["foo"]).unwrap(), Flushed::One(json!("bar")));
/// assert_eq!(engine.flush(&mut session, &["foo"]).unwrap(), Flushed::None);
/// ```
#[derive(Debug, Clone)]
pub struct FlashEngine {
    policy: FlashPolicy,
}

/// Result of a [`FlashEngine::flush`] call.
///
/// The shape mirrors the call: a flush of everything returns the whole
/// state, a flush of exactly one key returns that key's value bare, a flush
/// of several keys returns one entry per requested key in request order.
#[derive(Debug, Clone, PartialEq)]
pub enum Flushed {
    /// Nothing was stored under the flushed selection.
    None,
    /// The entire state, removed by a flush with no keys.
    All(FlashState),
    /// The value removed for the single requested key.
    One(Payload),
    /// Per-key removed values, in request order; absent keys yield `None`.
    Many(Vec<Option<Payload>>),
}

impl Flushed {
    /// Collapses the result into an optional payload.
    ///
    /// `All` converts through the state's storage shape, `Many` renders
    /// absent keys as null entries.
    pub fn into_payload(self) -> Option<Payload> {
        match self {
            Flushed::None => None,
            Flushed::All(state) => Some(state.into_payload()),
            Flushed::One(value) => Some(value),
            Flushed::Many(entries) => Some(Payload::Array(
                entries
                    .into_iter()
                    .map(|entry| entry.unwrap_or(Payload::Null))
                    .collect(),
            )),
        }
    }
}

impl FlashEngine {
    /// Creates an engine driven by the given policy.
    pub fn new(policy: FlashPolicy) -> Self {
        FlashEngine { policy }
    }

    /// The policy this engine was constructed with.
    pub fn policy(&self) -> &FlashPolicy {
        &self.policy
    }

    /// Reads and decodes the flash slot, if present.
    fn load<S: SessionStore>(&self, session: &S) -> Result<Option<FlashState>, FlashError> {
        session
            .get(self.policy.session_key())
            .map(|payload| FlashState::from_payload(self.policy.queue(), payload))
            .transpose()
    }

    /// Queues one flash value.
    ///
    /// `key` is required under the keyed queueing styles and missing it fails
    /// with [`FlashError::MissingKey`]. Under the non-keyed styles a supplied
    /// key is treated as an extra leading value, matching the variadic shape
    /// of the classic flash interface where the first positional argument is
    /// a key only when the store is keyed.
    ///
    /// The values are shaped per the argument style, merged into the stored
    /// state per the queueing style, written back, and the shaped value is
    /// returned unconditionally so callers may chain on it.
    pub fn set<S: SessionStore>(
        &self,
        session: &mut S,
        key: Option<&str>,
        values: &[Payload],
    ) -> Result<Payload, FlashError> {
        let queue = self.policy.queue();
        let prepended;
        let (key, values): (Option<&str>, &[Payload]) = if queue.is_keyed() {
            let key = key.ok_or(FlashError::MissingKey { queue })?;
            (Some(key), values)
        } else if let Some(extra) = key {
            let mut all = Vec::with_capacity(values.len() + 1);
            all.push(Payload::String(extra.to_owned()));
            all.extend_from_slice(values);
            prepended = all;
            (None, prepended.as_slice())
        } else {
            (None, values)
        };

        let value = shape_values(self.policy.arguments(), self.policy.separator(), values);
        let mut state = self
            .load(session)?
            .unwrap_or_else(|| FlashState::empty(queue));
        state.merge(key, value.clone())?;
        session.set(self.policy.session_key(), state.into_payload());

        debug!(
            slot = self.policy.session_key(),
            queue = %queue,
            key = ?key,
            "flash value queued"
        );
        Ok(value)
    }

    /// Removes flash state from the session and returns what was removed.
    ///
    /// With no keys the whole slot is cleared and returned; a second flush
    /// returns [`Flushed::None`]. With keys, only the named entries are
    /// removed, in request order, and the rest of the slot stays put.
    ///
    /// Flushing by key requires a keyed queueing style; under the non-keyed
    /// styles it fails with [`FlashError::KeyedFlush`] rather than silently
    /// clearing everything.
    pub fn flush<S: SessionStore>(
        &self,
        session: &mut S,
        keys: &[&str],
    ) -> Result<Flushed, FlashError> {
        let queue = self.policy.queue();
        if keys.is_empty() {
            let state = session
                .remove(self.policy.session_key())
                .map(|payload| FlashState::from_payload(queue, payload))
                .transpose()?;
            debug!(slot = self.policy.session_key(), "flash slot cleared");
            return Ok(match state {
                Some(state) if !state.is_empty() => Flushed::All(state),
                _ => Flushed::None,
            });
        }

        if !queue.is_keyed() {
            return Err(FlashError::KeyedFlush { queue });
        }

        let Some(mut state) = self.load(session)? else {
            return Ok(if keys.len() == 1 {
                Flushed::None
            } else {
                Flushed::Many(vec![None; keys.len()])
            });
        };

        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            removed.push(state.remove_key(key)?);
        }
        session.set(self.policy.session_key(), state.into_payload());
        debug!(
            slot = self.policy.session_key(),
            keys = ?keys,
            "flash entries flushed"
        );

        Ok(if keys.len() == 1 {
            match removed.pop().flatten() {
                Some(value) => Flushed::One(value),
                None => Flushed::None,
            }
        } else {
            Flushed::Many(removed)
        })
    }

    /// Begins a render cycle and returns the token for the view context.
    ///
    /// The host framework calls this exactly once per render, after all
    /// [`set`](FlashEngine::set) calls for the request and before the view
    /// evaluates, and injects the returned [`RenderCycle`] under
    /// [`RenderCycle::token_name`]. The dequeue style decides whether the
    /// session is cleared here (`always`), on first read (`when_used`,
    /// `by_key`), or not at all (`never`).
    pub fn materialize<'a, S: SessionStore>(
        &'a self,
        session: &'a mut S,
    ) -> Result<RenderCycle<'a, S>, FlashError> {
        RenderCycle::begin(&self.policy, session)
    }
}
