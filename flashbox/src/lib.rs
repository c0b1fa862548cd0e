#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// The flash policy engine: `set`, `flush`, and `materialize`.
///
/// [`FlashEngine`](engine::FlashEngine) is the single entrypoint application
/// code and framework glue interact with. It is stateless apart from its
/// immutable policy; all mutable state lives in the caller's session.
pub mod engine;

/// Per-render-cycle token with lazy, read-triggered clearing.
///
/// [`RenderCycle`](cycle::RenderCycle) is the value injected into the view
/// context once per render. It carries the explicit per-cycle cache that
/// makes repeated reads idempotent under the `when_used` and `by_key`
/// dequeue styles.
pub mod cycle;

mod shape;

pub use cycle::RenderCycle;
pub use engine::{FlashEngine, Flushed};

pub use flashbox_core::{
    ArgumentStyle, DequeueStyle, FlashError, FlashPolicy, FlashPolicyBuilder, FlashState,
    Payload, QueueStyle, SessionStore,
};
