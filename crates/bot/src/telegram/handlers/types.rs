//! Handler types and dependencies

use std::sync::Arc;

use teloxide::types::Message;

use avatarka_core::{OverlayCatalog, SessionStore};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub session_store: Arc<SessionStore>,
    pub catalog: Arc<OverlayCatalog>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(session_store: Arc<SessionStore>, catalog: Arc<OverlayCatalog>) -> Self {
        Self { session_store, catalog }
    }
}

/// Session key for a message: the sender's user id, falling back to the chat
/// id when Telegram omits the sender. In private chats the two coincide.
pub fn user_key(msg: &Message) -> i64 {
    msg.from
        .as_ref()
        .and_then(|u| i64::try_from(u.id.0).ok())
        .unwrap_or(msg.chat.id.0)
}
