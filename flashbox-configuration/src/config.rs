//! The flat flash configuration mapping.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use flashbox_core::policy::{DEFAULT_SESSION_KEY, DEFAULT_TOKEN_NAME};
use flashbox_core::{ArgumentStyle, DequeueStyle, FlashPolicy, QueueStyle};

use crate::error::ConfigError;

/// Flash plugin configuration as supplied by the host application.
///
/// All fields are optional in the document; omitted fields take the engine
/// defaults. Unknown fields and unknown enum values are parse errors.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FlashConfig {
    /// Name of the token injected into the view context.
    pub token_name: SmolStr,
    /// Name of the session slot holding flash state.
    pub session_hash_key: SmolStr,
    /// Queueing style.
    pub queue: QueueStyle,
    /// Argument-shaping style.
    pub arguments: ArgumentStyle,
    /// Dequeueing style.
    pub dequeue: DequeueStyle,
    /// Separator for the `join` argument style.
    pub separator: SmolStr,
}

impl Default for FlashConfig {
    fn default() -> Self {
        FlashConfig {
            token_name: SmolStr::new_static(DEFAULT_TOKEN_NAME),
            session_hash_key: SmolStr::new_static(DEFAULT_SESSION_KEY),
            queue: QueueStyle::default(),
            arguments: ArgumentStyle::default(),
            dequeue: DequeueStyle::default(),
            separator: SmolStr::default(),
        }
    }
}

impl FlashConfig {
    /// Parses a configuration document from YAML.
    pub fn from_yaml(document: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(document).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Validates the style combination and converts into an engine policy.
    pub fn into_policy(self) -> Result<FlashPolicy, ConfigError> {
        let policy = FlashPolicy::builder()
            .token_name(self.token_name)
            .session_key(self.session_hash_key)
            .queue(self.queue)
            .arguments(self.arguments)
            .dequeue(self.dequeue)
            .separator(self.separator)
            .build()?;
        Ok(policy)
    }
}
