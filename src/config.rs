use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::coach::{DEFAULT_MAX_MESSAGES, DEFAULT_MESSAGE_LIFETIME};
use crate::event::PlayMode;


pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_SUGGEST_INTERVAL: Duration = Duration::from_secs(7);

// Durations are written in human-readable form, e.g. `suggest_interval: 7s`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub server_url: String,
    pub mode: PlayMode,
    pub coach_enabled: bool,
    #[serde(with = "humantime_serde")]
    pub suggest_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub coach_message_lifetime: Duration,
    pub max_coach_messages: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            mode: PlayMode::Ai,
            coach_enabled: true,
            suggest_interval: DEFAULT_SUGGEST_INTERVAL,
            coach_message_lifetime: DEFAULT_MESSAGE_LIFETIME,
            max_coach_messages: DEFAULT_MAX_MESSAGES,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"mode": "human", "suggest_interval": "30s"}"#).unwrap();
        assert_eq!(config, ClientConfig {
            mode: PlayMode::Human,
            suggest_interval: Duration::from_secs(30),
            ..ClientConfig::default()
        });
        assert!(serde_json::from_str::<ClientConfig>(r#"{"colour": "w"}"#).is_err());
    }
}
