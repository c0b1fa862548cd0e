//! Error types for flash operations.

use thiserror::Error;

use crate::policy::{DequeueStyle, QueueStyle};

/// Error type for flash policy and flash store operations.
///
/// Configuration errors (`InvalidConfiguration`, `IncompatibleDequeue`) are
/// fatal at startup and prevent an engine from being constructed. The
/// remaining variants are caller contract violations surfaced to application
/// code; nothing is retried or recovered internally.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlashError {
    /// A style setting received a value outside its closed enum.
    #[error("unrecognized value `{value}` for setting `{setting}`")]
    InvalidConfiguration {
        /// Name of the offending setting (`queue`, `arguments` or `dequeue`).
        setting: &'static str,
        /// The unrecognized value as supplied.
        value: String,
    },

    /// `by_key` dequeueing was paired with a queueing style that has no keys.
    #[error("dequeue style `by_key` requires a keyed queue style, got `{queue}`")]
    IncompatibleDequeue {
        /// The configured non-keyed queueing style.
        queue: QueueStyle,
    },

    /// A keyed queueing style was invoked without a key.
    #[error("queue style `{queue}` requires a key on every flash call")]
    MissingKey {
        /// The configured keyed queueing style.
        queue: QueueStyle,
    },

    /// A flush by key was requested while the store has no keys to flush by.
    #[error("flush by key is not supported under queue style `{queue}`")]
    KeyedFlush {
        /// The configured non-keyed queueing style.
        queue: QueueStyle,
    },

    /// The render token was accessed in a way its dequeue style does not
    /// provide (whole-state access under `by_key`, per-key access otherwise).
    #[error("flash token for dequeue style `{dequeue}` does not provide this access")]
    WrongTokenAccess {
        /// The configured dequeueing style.
        dequeue: DequeueStyle,
    },

    /// The session slot holds data whose shape does not match the configured
    /// queueing style.
    #[error("session slot holds a value incompatible with queue style `{queue}`")]
    CorruptSlot {
        /// The configured queueing style the slot data failed to match.
        queue: QueueStyle,
    },
}
