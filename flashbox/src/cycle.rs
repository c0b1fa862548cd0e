//! Per-render-cycle flash token.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::debug;

use flashbox_core::{DequeueStyle, FlashError, FlashPolicy, FlashState, Payload, SessionStore};

/// Read state of one key within a render cycle.
///
/// `Pending` marks a key that was present at materialize time but has not
/// been read yet; `Taken` caches what the first read removed so repeated
/// reads within the cycle never touch the session again.
#[derive(Debug, Clone)]
enum KeyCell {
    Pending,
    Taken(Option<Payload>),
}

/// The token injected into the view context for one render cycle.
///
/// Created by [`FlashEngine::materialize`](crate::FlashEngine::materialize).
/// The cycle borrows the session mutably for its lifetime, which pins it to
/// one request and makes the single-materialize-per-render contract hard to
/// violate by accident.
///
/// Which accessors apply depends on the dequeue style:
///
/// - `never` / `always`: [`peek`](RenderCycle::peek) (or
///   [`take`](RenderCycle::take), which returns the same snapshot)
/// - `when_used`: [`take`](RenderCycle::take)
/// - `by_key`: [`keys`](RenderCycle::keys) and
///   [`take_key`](RenderCycle::take_key)
///
/// Accessing the whole state under `by_key`, or a single key under any other
/// style, fails with [`FlashError::WrongTokenAccess`].
pub struct RenderCycle<'a, S: SessionStore> {
    policy: &'a FlashPolicy,
    session: &'a mut S,
    snapshot: Option<FlashState>,
    taken: Option<Option<FlashState>>,
    keyed: IndexMap<SmolStr, KeyCell>,
}

impl<'a, S: SessionStore> RenderCycle<'a, S> {
    pub(crate) fn begin(
        policy: &'a FlashPolicy,
        session: &'a mut S,
    ) -> Result<Self, FlashError> {
        let snapshot = session
            .get(policy.session_key())
            .map(|payload| FlashState::from_payload(policy.queue(), payload))
            .transpose()?;

        let mut keyed = IndexMap::new();
        match policy.dequeue() {
            DequeueStyle::Always => {
                session.remove(policy.session_key());
                debug!(
                    slot = policy.session_key(),
                    "flash slot cleared at materialize"
                );
            }
            DequeueStyle::ByKey => {
                if let Some(state) = &snapshot {
                    for key in state.keys() {
                        keyed.insert(key, KeyCell::Pending);
                    }
                }
            }
            DequeueStyle::Never | DequeueStyle::WhenUsed => {}
        }

        Ok(RenderCycle {
            policy,
            session,
            snapshot,
            taken: None,
            keyed,
        })
    }

    /// Name under which this token is injected into the view context.
    pub fn token_name(&self) -> &str {
        self.policy.token_name()
    }

    /// Snapshot of the state as it was at materialize time.
    ///
    /// Never touches the session. Under `always` this is the state captured
    /// just before the slot was cleared.
    pub fn peek(&self) -> Option<&FlashState> {
        self.snapshot.as_ref()
    }

    /// Keys present at materialize time, in insertion order.
    ///
    /// Only populated under the `by_key` dequeue style; empty otherwise.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keyed.keys().map(SmolStr::as_str)
    }

    /// Reads the whole flash state for this cycle.
    ///
    /// - `never`: returns the snapshot; the session is left untouched.
    /// - `always`: returns the snapshot; the session was already cleared at
    ///   materialize time.
    /// - `when_used`: on first call, removes the slot from the session and
    ///   caches it; repeated calls within the cycle return the cached state
    ///   without further session access. If never called, the session stays
    ///   untouched.
    /// - `by_key`: fails with [`FlashError::WrongTokenAccess`]; use
    ///   [`take_key`](RenderCycle::take_key).
    pub fn take(&mut self) -> Result<Option<FlashState>, FlashError> {
        match self.policy.dequeue() {
            DequeueStyle::Never | DequeueStyle::Always => Ok(self.snapshot.clone()),
            DequeueStyle::WhenUsed => {
                if let Some(cached) = &self.taken {
                    return Ok(cached.clone());
                }
                let state = self
                    .session
                    .remove(self.policy.session_key())
                    .map(|payload| FlashState::from_payload(self.policy.queue(), payload))
                    .transpose()?;
                debug!(
                    slot = self.policy.session_key(),
                    "flash slot cleared on first use"
                );
                self.taken = Some(state.clone());
                Ok(state)
            }
            DequeueStyle::ByKey => Err(FlashError::WrongTokenAccess {
                dequeue: DequeueStyle::ByKey,
            }),
        }
    }

    /// Reads one key's value for this cycle (`by_key` only).
    ///
    /// On the first read of a key that was present at materialize time, that
    /// key alone is removed from the session-backed state and the removed
    /// value is cached; other keys stay stored and survive to later cycles
    /// if unread. Repeated reads of the same key within the cycle return the
    /// cached value. Keys that were not present at materialize time yield
    /// `None` without touching the session.
    pub fn take_key(&mut self, key: &str) -> Result<Option<Payload>, FlashError> {
        let dequeue = self.policy.dequeue();
        if dequeue != DequeueStyle::ByKey {
            return Err(FlashError::WrongTokenAccess { dequeue });
        }

        match self.keyed.get(key) {
            Some(KeyCell::Taken(value)) => return Ok(value.clone()),
            Some(KeyCell::Pending) => {}
            None => return Ok(None),
        }

        let value = match self.session.get(self.policy.session_key()) {
            Some(payload) => {
                let mut state = FlashState::from_payload(self.policy.queue(), payload)?;
                let value = state.remove_key(key)?;
                self.session
                    .set(self.policy.session_key(), state.into_payload());
                value
            }
            None => None,
        };
        debug!(
            slot = self.policy.session_key(),
            key, "flash key cleared on first use"
        );
        self.keyed
            .insert(SmolStr::new(key), KeyCell::Taken(value.clone()));
        Ok(value)
    }
}

impl<S: SessionStore> std::fmt::Debug for RenderCycle<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderCycle")
            .field("token_name", &self.policy.token_name())
            .field("dequeue", &self.policy.dequeue())
            .field("snapshot", &self.snapshot)
            .field("keyed", &self.keyed)
            .finish()
    }
}
