//! Flash lifecycle policy types and validation.
//!
//! This module provides the three orthogonal style enums that parameterize a
//! flash store, and the [`FlashPolicy`] struct that binds them together with
//! the token and slot names:
//!
//! - [`QueueStyle`] - how repeated writes accumulate in the session slot
//! - [`ArgumentStyle`] - how the values of one call collapse into one payload
//! - [`DequeueStyle`] - when stored state is cleared relative to being read
//!
//! Policies are immutable once built. [`FlashPolicyBuilder::build`] is the
//! single validation point: a policy that exists is a policy that is valid,
//! so the engine never re-checks style combinations at call time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::FlashError;

/// Default name of the token injected into the view context.
pub const DEFAULT_TOKEN_NAME: &str = "flash";

/// Default name of the session slot holding flash state.
pub const DEFAULT_SESSION_KEY: &str = "_flash";

/// How repeated flash writes accumulate into the stored structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStyle {
    /// One value; every write overwrites the previous one.
    Single,
    /// An ordered sequence; every write appends.
    Multiple,
    /// A map from key to one value; writes overwrite per key.
    #[default]
    KeySingle,
    /// A map from key to an ordered sequence; writes append per key.
    KeyMultiple,
}

impl QueueStyle {
    /// Returns the style as a string slice.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            QueueStyle::Single => "single",
            QueueStyle::Multiple => "multiple",
            QueueStyle::KeySingle => "key_single",
            QueueStyle::KeyMultiple => "key_multiple",
        }
    }

    /// Whether this style stores values under caller-supplied keys.
    #[inline]
    pub const fn is_keyed(&self) -> bool {
        matches!(self, QueueStyle::KeySingle | QueueStyle::KeyMultiple)
    }
}

impl fmt::Display for QueueStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueueStyle {
    type Err = FlashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(QueueStyle::Single),
            "multiple" => Ok(QueueStyle::Multiple),
            "key_single" => Ok(QueueStyle::KeySingle),
            "key_multiple" => Ok(QueueStyle::KeyMultiple),
            other => Err(FlashError::InvalidConfiguration {
                setting: "queue",
                value: other.to_owned(),
            }),
        }
    }
}

/// How the positional values of one flash call collapse into one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentStyle {
    /// Keep only the first value.
    Single,
    /// Join all values into one string with the configured separator.
    #[default]
    Join,
    /// One value stays bare, several become a sequence.
    Auto,
    /// Always wrap the values in a sequence, even a single one.
    Array,
}

impl ArgumentStyle {
    /// Returns the style as a string slice.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ArgumentStyle::Single => "single",
            ArgumentStyle::Join => "join",
            ArgumentStyle::Auto => "auto",
            ArgumentStyle::Array => "array",
        }
    }
}

impl fmt::Display for ArgumentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArgumentStyle {
    type Err = FlashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(ArgumentStyle::Single),
            "join" => Ok(ArgumentStyle::Join),
            "auto" => Ok(ArgumentStyle::Auto),
            "array" => Ok(ArgumentStyle::Array),
            other => Err(FlashError::InvalidConfiguration {
                setting: "arguments",
                value: other.to_owned(),
            }),
        }
    }
}

/// When stored flash state is cleared relative to being read by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DequeueStyle {
    /// Never cleared by the render hook; clearing is the caller's concern.
    Never,
    /// Cleared synchronously at materialize time, read or not.
    Always,
    /// Cleared lazily on first whole-state read within a render cycle.
    WhenUsed,
    /// Cleared lazily per key on first read of that key; unread keys survive
    /// to later render cycles. Requires a keyed [`QueueStyle`].
    #[default]
    ByKey,
}

impl DequeueStyle {
    /// Returns the style as a string slice.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DequeueStyle::Never => "never",
            DequeueStyle::Always => "always",
            DequeueStyle::WhenUsed => "when_used",
            DequeueStyle::ByKey => "by_key",
        }
    }
}

impl fmt::Display for DequeueStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DequeueStyle {
    type Err = FlashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(DequeueStyle::Never),
            "always" => Ok(DequeueStyle::Always),
            "when_used" => Ok(DequeueStyle::WhenUsed),
            "by_key" => Ok(DequeueStyle::ByKey),
            other => Err(FlashError::InvalidConfiguration {
                setting: "dequeue",
                value: other.to_owned(),
            }),
        }
    }
}

/// Immutable flash lifecycle policy.
///
/// Built once at application startup via [`FlashPolicy::builder`] and handed
/// to the engine. Construction is the only validation point: `by_key`
/// dequeueing with a non-keyed queue style is rejected here, so call sites
/// never see an invalid combination.
///
/// # Example
///
/// ```
/// use flashbox_core::{DequeueStyle, FlashPolicy, QueueStyle};
///
/// let policy = FlashPolicy::builder()
///     .queue(QueueStyle::Multiple)
///     .dequeue(DequeueStyle::Always)
///     .build()
///     .unwrap();
/// assert_eq!(policy.token_name(), "flash");
/// assert_eq!(policy.session_key(), "_flash");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashPolicy {
    token_name: SmolStr,
    session_key: SmolStr,
    queue: QueueStyle,
    arguments: ArgumentStyle,
    dequeue: DequeueStyle,
    separator: SmolStr,
}

impl Default for FlashPolicy {
    fn default() -> Self {
        // The default style combination (key_single/join/by_key) is valid,
        // so this cannot go through the fallible builder path.
        FlashPolicy {
            token_name: SmolStr::new_static(DEFAULT_TOKEN_NAME),
            session_key: SmolStr::new_static(DEFAULT_SESSION_KEY),
            queue: QueueStyle::default(),
            arguments: ArgumentStyle::default(),
            dequeue: DequeueStyle::default(),
            separator: SmolStr::default(),
        }
    }
}

impl FlashPolicy {
    /// Creates a new builder initialized with the default policy.
    pub fn builder() -> FlashPolicyBuilder {
        FlashPolicyBuilder::default()
    }

    /// Name of the token injected into the view context.
    #[inline]
    pub fn token_name(&self) -> &str {
        &self.token_name
    }

    /// Name of the session slot holding flash state.
    #[inline]
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    /// The configured queueing style.
    #[inline]
    pub fn queue(&self) -> QueueStyle {
        self.queue
    }

    /// The configured argument-shaping style.
    #[inline]
    pub fn arguments(&self) -> ArgumentStyle {
        self.arguments
    }

    /// The configured dequeueing style.
    #[inline]
    pub fn dequeue(&self) -> DequeueStyle {
        self.dequeue
    }

    /// Separator used by the `join` argument style.
    #[inline]
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

/// Builder for [`FlashPolicy`].
///
/// All fields default to the values named in the crate documentation:
/// `queue = key_single`, `arguments = join`, `dequeue = by_key`,
/// `token_name = "flash"`, `session_key = "_flash"`, empty separator.
#[derive(Debug, Clone, Default)]
pub struct FlashPolicyBuilder {
    policy: FlashPolicy,
}

impl FlashPolicyBuilder {
    /// Sets the queueing style.
    pub fn queue(mut self, queue: QueueStyle) -> Self {
        self.policy.queue = queue;
        self
    }

    /// Sets the argument-shaping style.
    pub fn arguments(mut self, arguments: ArgumentStyle) -> Self {
        self.policy.arguments = arguments;
        self
    }

    /// Sets the dequeueing style.
    pub fn dequeue(mut self, dequeue: DequeueStyle) -> Self {
        self.policy.dequeue = dequeue;
        self
    }

    /// Sets the view-context token name.
    pub fn token_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.policy.token_name = name.into();
        self
    }

    /// Sets the session slot name.
    pub fn session_key(mut self, key: impl Into<SmolStr>) -> Self {
        self.policy.session_key = key.into();
        self
    }

    /// Sets the separator used by the `join` argument style.
    pub fn separator(mut self, separator: impl Into<SmolStr>) -> Self {
        self.policy.separator = separator.into();
        self
    }

    /// Validates the style combination and returns the policy.
    ///
    /// Fails with [`FlashError::IncompatibleDequeue`] when `by_key`
    /// dequeueing is paired with a non-keyed queue style.
    pub fn build(self) -> Result<FlashPolicy, FlashError> {
        if self.policy.dequeue == DequeueStyle::ByKey && !self.policy.queue.is_keyed() {
            return Err(FlashError::IncompatibleDequeue {
                queue: self.policy.queue,
            });
        }
        Ok(self.policy)
    }
}
