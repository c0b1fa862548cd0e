#![warn(missing_docs)]
//! # flashbox-core
//!
//! Core types and traits for the Flashbox flash-message engine.
//!
//! Flash messages are values set during one request and surfaced to that
//! request's (or the next request's) view, then cleared from session storage
//! according to a configurable lifecycle. This crate provides the
//! foundational abstractions that make Flashbox **storage-agnostic**:
//!
//! - **Decide** how writes accumulate ([`QueueStyle`])
//! - **Decide** how call arguments collapse into one value ([`ArgumentStyle`])
//! - **Decide** when stored state is cleared relative to being read
//!   ([`DequeueStyle`])
//! - **Bridge** to the host framework's session ([`SessionStore`])
//!
//! The three styles combine into an immutable [`FlashPolicy`], validated once
//! at construction. The engine itself lives in the `flashbox` crate.

pub mod error;
pub mod policy;
pub mod session;
pub mod value;

pub use error::FlashError;
pub use policy::{ArgumentStyle, DequeueStyle, FlashPolicy, FlashPolicyBuilder, QueueStyle};
pub use session::SessionStore;
pub use value::{FlashState, Payload};
