use super::registry::UserId;
use serde::Serialize;

/// Ephemeral event pushed to a connection. Serialises as
/// `{"type": "...", ...}` for the socket layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelayEvent {
    OnlineUsers {
        users: Vec<UserId>,
    },
    Typing {
        from: UserId,
        to: UserId,
        is_typing: bool,
    },
    Notify {
        from: UserId,
        to: UserId,
        payload: serde_json::Value,
    },
}

impl RelayEvent {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
