//! Session-scoped chat history and the state derived from it.

use super::entities::{ChatTurn, Role};
use crate::core::question::Question;

/// Whether the session is waiting on the user or owes an assistant response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    /// Last turn is from the assistant (or the history was just seeded).
    AwaitingUser,
    /// Last turn is a user question without an answer yet.
    AwaitingAssistant,
}

/// Ordered, append-only list of chat turns for one session.
///
/// Always holds at least the seeded greeting, so `last()` never fails.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    /// Create a history seeded with a single assistant greeting.
    pub fn seeded(greeting: impl Into<String>) -> Self {
        Self {
            turns: vec![ChatTurn::assistant(greeting)],
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// A seeded history is never empty; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> &ChatTurn {
        // Seeded on construction and only ever appended to.
        &self.turns[self.turns.len() - 1]
    }

    pub fn state(&self) -> ChatState {
        match self.last().role() {
            Role::User => ChatState::AwaitingAssistant,
            Role::Assistant => ChatState::AwaitingUser,
        }
    }

    /// The unanswered question, if the last turn is from the user.
    pub fn pending_question(&self) -> Option<&str> {
        let last = self.last();
        last.is_user().then(|| last.content())
    }

    pub fn push_user(&mut self, question: Question) {
        self.turns.push(ChatTurn::user(question.into_content()));
    }

    pub fn push_assistant(&mut self, turn: ChatTurn) {
        debug_assert!(turn.is_assistant());
        self.turns.push(turn);
    }
}
