use crate::message::RenderedMessage;
use std::collections::HashMap;

/// A device registration at the push delivery provider.
///
/// Tokens are unique by their exact value only. The same user may own several.
#[derive(Debug, Clone, PartialEq)]
pub struct PushToken {
    pub token: String,
    pub user_id: Option<String>,
    pub created: i64,
}

impl PushToken {
    pub fn new(token: String, user_id: Option<String>, created: i64) -> Self {
        Self {
            token,
            user_id,
            created,
        }
    }
}

/// Payload broadcast to every registered token
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

impl PushMessage {
    pub fn new(message: RenderedMessage, data: HashMap<String, String>) -> Self {
        Self {
            title: message.title,
            body: message.body,
            data,
        }
    }
}
