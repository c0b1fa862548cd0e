#![warn(missing_docs)]
//! Configuration support for the Flashbox flash-message engine.
//!
//! [`FlashConfig`] is the flat mapping a host application supplies, with one
//! key per policy setting and defaults matching the engine's defaults:
//!
//! ```yaml
//! token_name: flash
//! session_hash_key: _flash
//! queue: key_single
//! arguments: join
//! dequeue: by_key
//! separator: ""
//! ```
//!
//! Loading is separate from validation: [`FlashConfig::from_yaml`] only
//! parses, [`FlashConfig::into_policy`] checks style compatibility and hands
//! back an immutable [`FlashPolicy`](flashbox_core::FlashPolicy). Both steps
//! fail fatally; the plugin must not register with a broken configuration.

pub mod config;
pub mod error;

pub use config::FlashConfig;
pub use error::ConfigError;
