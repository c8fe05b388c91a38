//! Explicit per-session context.

use crate::ports::query_engine::QueryEngine;
use docchat_domain::{ChatHistory, ChatState};
use uuid::Uuid;

/// Everything owned by one interactive session.
///
/// Passed by `&mut` into every [`ChatController`](super::chat_controller::ChatController)
/// operation; nothing about a session lives in global state. Dropping the
/// session discards its history and engine.
pub struct ChatSession {
    id: Uuid,
    pub(crate) history: ChatHistory,
    pub(crate) engine: Option<Box<dyn QueryEngine>>,
}

impl ChatSession {
    /// Start a session whose history holds only the greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            history: ChatHistory::seeded(greeting),
            engine: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn state(&self) -> ChatState {
        self.history.state()
    }

    /// Whether the query engine has been created yet.
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("turns", &self.history.len())
            .field("state", &self.history.state())
            .field("has_engine", &self.engine.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_seeded_without_engine() {
        let session = ChatSession::new("Ask me a question about LaTeX!");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.state(), ChatState::AwaitingUser);
        assert!(!session.has_engine());
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = ChatSession::new("hi");
        let b = ChatSession::new("hi");
        assert_ne!(a.id(), b.id());
    }
}
