//! Simulates the classic flash workflow: a failed login sets messages before
//! a redirect, and the page after the redirect reads them from the token.
//!
//! Run with: `cargo run -p flashbox-demos --bin login_flow`

use flashbox::{FlashEngine, SessionStore};
use flashbox_configuration::FlashConfig;
use flashbox_memory::MemorySession;
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = FlashConfig::from_yaml(
        r#"
queue: key_single
arguments: join
dequeue: by_key
"#,
    )?;
    let engine = FlashEngine::new(config.into_policy()?);

    // One session object lives across the redirect.
    let mut session = MemorySession::new();

    // Request 1: POST /login fails and queues two messages.
    engine.set(&mut session, Some("error"), &[json!("wrong password")])?;
    engine.set(&mut session, Some("notice"), &[json!("3 attempts left")])?;
    tracing::info!("login failed, redirecting to /login");

    // Request 2: GET /login renders. The template block for errors reads
    // its key; the notice block is not part of this template.
    {
        let mut cycle = engine.materialize(&mut session)?;
        tracing::info!(token = cycle.token_name(), "render cycle started");
        if let Some(error) = cycle.take_key("error")? {
            tracing::info!(%error, "template rendered the error block");
        }
    }

    // The unread notice survived the render and is still in the session.
    tracing::info!(slot = ?session.get("_flash"), "session after first render");

    // Request 3: a later page that does render notices picks it up.
    {
        let mut cycle = engine.materialize(&mut session)?;
        if let Some(notice) = cycle.take_key("notice")? {
            tracing::info!(%notice, "template rendered the notice block");
        }
    }
    tracing::info!(slot = ?session.get("_flash"), "session after second render");

    Ok(())
}
