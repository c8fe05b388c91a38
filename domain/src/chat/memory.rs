//! Bounded conversation memory for question condensation.

use super::entities::ChatTurn;

/// Characters of conversation kept for condensation when nothing else is configured.
pub const DEFAULT_MEMORY_CHAR_LIMIT: usize = 12_000;

/// Completed exchanges, oldest first, held within a character budget.
///
/// Whole exchanges (question plus answer) are dropped from the front once
/// the budget is exceeded. The most recent exchange is always kept, so the
/// total can exceed the budget by at most that one exchange.
#[derive(Debug, Clone)]
pub struct ChatMemory {
    turns: Vec<ChatTurn>,
    chars: usize,
    char_limit: usize,
}

impl ChatMemory {
    pub fn new(char_limit: usize) -> Self {
        Self {
            turns: Vec::new(),
            chars: 0,
            char_limit,
        }
    }

    /// Remember a completed exchange, then trim to the budget.
    pub fn record(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        let question = ChatTurn::user(question);
        let answer = ChatTurn::assistant(answer);
        self.chars += turn_chars(&question) + turn_chars(&answer);
        self.turns.push(question);
        self.turns.push(answer);

        while self.chars > self.char_limit && self.turns.len() > 2 {
            let dropped: usize = self.turns.drain(..2).map(|t| turn_chars(&t)).sum();
            self.chars -= dropped;
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Characters currently held.
    pub fn chars(&self) -> usize {
        self.chars
    }
}

impl Default for ChatMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_CHAR_LIMIT)
    }
}

fn turn_chars(turn: &ChatTurn) -> usize {
    turn.content().chars().count()
}
