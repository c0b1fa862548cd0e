//! Flash state shapes and payload conversion.
//!
//! This module provides [`FlashState`], the in-memory representation of the
//! session slot. Its shape is fixed by the configured [`QueueStyle`]:
//!
//! | Queueing style | Stored shape |
//! |----------------|--------------|
//! | `single`       | one payload |
//! | `multiple`     | ordered sequence of payloads |
//! | `key_single`   | insertion-ordered map, key to payload |
//! | `key_multiple` | insertion-ordered map, key to sequence |
//!
//! State round-trips to a plain [`Payload`] for storage in the session
//! (`single` stores the bare value, `multiple` an array, the keyed styles an
//! object). Decoding a slot whose JSON shape does not match the configured
//! style fails with [`FlashError::CorruptSlot`].

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::error::FlashError;
use crate::policy::QueueStyle;

/// Payload type carried by flash entries.
///
/// Flash values are arbitrary JSON shapes; using `serde_json::Value` keeps
/// the engine agnostic of what applications attach to a message.
pub type Payload = serde_json::Value;

/// The session slot's flash state, shaped by the configured queueing style.
#[derive(Debug, Clone, PartialEq)]
pub enum FlashState {
    /// One value, overwritten on every write.
    Single(Payload),
    /// Ordered sequence of values, appended on every write.
    Multiple(Vec<Payload>),
    /// Map from key to one value, overwritten per key.
    KeySingle(IndexMap<SmolStr, Payload>),
    /// Map from key to an ordered sequence, appended per key.
    KeyMultiple(IndexMap<SmolStr, Vec<Payload>>),
}

impl FlashState {
    /// Creates the empty state of the shape the given style requires.
    ///
    /// `single` has no empty value of its own; it starts as JSON null and is
    /// overwritten by the first write.
    pub fn empty(queue: QueueStyle) -> Self {
        match queue {
            QueueStyle::Single => FlashState::Single(Payload::Null),
            QueueStyle::Multiple => FlashState::Multiple(Vec::new()),
            QueueStyle::KeySingle => FlashState::KeySingle(IndexMap::new()),
            QueueStyle::KeyMultiple => FlashState::KeyMultiple(IndexMap::new()),
        }
    }

    /// The queueing style this state's shape corresponds to.
    pub fn queue_style(&self) -> QueueStyle {
        match self {
            FlashState::Single(_) => QueueStyle::Single,
            FlashState::Multiple(_) => QueueStyle::Multiple,
            FlashState::KeySingle(_) => QueueStyle::KeySingle,
            FlashState::KeyMultiple(_) => QueueStyle::KeyMultiple,
        }
    }

    /// Whether the state holds no entries.
    ///
    /// A `single` state created by [`FlashState::empty`] still holds null and
    /// counts as empty; once written to it never empties again short of a
    /// flush.
    pub fn is_empty(&self) -> bool {
        match self {
            FlashState::Single(value) => value.is_null(),
            FlashState::Multiple(items) => items.is_empty(),
            FlashState::KeySingle(map) => map.is_empty(),
            FlashState::KeyMultiple(map) => map.is_empty(),
        }
    }

    /// Keys currently present, in insertion order. Empty for non-keyed shapes.
    pub fn keys(&self) -> Vec<SmolStr> {
        match self {
            FlashState::KeySingle(map) => map.keys().cloned().collect(),
            FlashState::KeyMultiple(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the value stored under `key`, if any.
    ///
    /// For `key_multiple` the key's sequence is returned as an array payload.
    /// Non-keyed shapes hold no keys and always return `None`.
    pub fn get_key(&self, key: &str) -> Option<Payload> {
        match self {
            FlashState::KeySingle(map) => map.get(key).cloned(),
            FlashState::KeyMultiple(map) => {
                map.get(key).map(|items| Payload::Array(items.clone()))
            }
            _ => None,
        }
    }

    /// Merges one shaped value into the state per the queueing style's rule.
    ///
    /// `key` must be present for keyed shapes; the engine enforces this
    /// before shaping, so hitting [`FlashError::MissingKey`] here means a
    /// caller bypassed the engine.
    pub fn merge(&mut self, key: Option<&str>, value: Payload) -> Result<(), FlashError> {
        match self {
            FlashState::Single(slot) => {
                *slot = value;
            }
            FlashState::Multiple(items) => {
                items.push(value);
            }
            FlashState::KeySingle(map) => {
                let key = key.ok_or(FlashError::MissingKey {
                    queue: QueueStyle::KeySingle,
                })?;
                map.insert(SmolStr::new(key), value);
            }
            FlashState::KeyMultiple(map) => {
                let key = key.ok_or(FlashError::MissingKey {
                    queue: QueueStyle::KeyMultiple,
                })?;
                map.entry(SmolStr::new(key)).or_default().push(value);
            }
        }
        Ok(())
    }

    /// Removes and returns the value stored under `key`.
    ///
    /// For `key_multiple` the removed sequence is returned as an array
    /// payload. Insertion order of the remaining keys is preserved. Fails
    /// with [`FlashError::KeyedFlush`] for non-keyed shapes.
    pub fn remove_key(&mut self, key: &str) -> Result<Option<Payload>, FlashError> {
        match self {
            FlashState::KeySingle(map) => Ok(map.shift_remove(key)),
            FlashState::KeyMultiple(map) => Ok(map.shift_remove(key).map(Payload::Array)),
            other => Err(FlashError::KeyedFlush {
                queue: other.queue_style(),
            }),
        }
    }

    /// Converts the state into the payload written to the session slot.
    pub fn into_payload(self) -> Payload {
        match self {
            FlashState::Single(value) => value,
            FlashState::Multiple(items) => Payload::Array(items),
            FlashState::KeySingle(map) => Payload::Object(
                map.into_iter()
                    .map(|(key, value)| (key.to_string(), value))
                    .collect(),
            ),
            FlashState::KeyMultiple(map) => Payload::Object(
                map.into_iter()
                    .map(|(key, items)| (key.to_string(), Payload::Array(items)))
                    .collect(),
            ),
        }
    }

    /// Decodes a session slot payload into the shape the style requires.
    ///
    /// Fails with [`FlashError::CorruptSlot`] when the payload's JSON shape
    /// does not match: `multiple` requires an array, the keyed styles an
    /// object, and `key_multiple` additionally requires every entry to be an
    /// array.
    pub fn from_payload(queue: QueueStyle, payload: Payload) -> Result<Self, FlashError> {
        match queue {
            QueueStyle::Single => Ok(FlashState::Single(payload)),
            QueueStyle::Multiple => match payload {
                Payload::Array(items) => Ok(FlashState::Multiple(items)),
                _ => Err(FlashError::CorruptSlot { queue }),
            },
            QueueStyle::KeySingle => match payload {
                Payload::Object(map) => Ok(FlashState::KeySingle(
                    map.into_iter()
                        .map(|(key, value)| (SmolStr::from(key), value))
                        .collect(),
                )),
                _ => Err(FlashError::CorruptSlot { queue }),
            },
            QueueStyle::KeyMultiple => match payload {
                Payload::Object(map) => map
                    .into_iter()
                    .map(|(key, value)| match value {
                        Payload::Array(items) => Ok((SmolStr::from(key), items)),
                        _ => Err(FlashError::CorruptSlot { queue }),
                    })
                    .collect::<Result<IndexMap<_, _>, _>>()
                    .map(FlashState::KeyMultiple),
                _ => Err(FlashError::CorruptSlot { queue }),
            },
        }
    }
}
