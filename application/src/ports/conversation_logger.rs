//! Transcript port.
//!
//! Chat events (turns, failures, index builds) are handed to a
//! [`ConversationLogger`] as JSON payloads. Diagnostics stay on `tracing`;
//! this port is only for the machine-readable record of a conversation.

use serde_json::Value;

/// One transcript record.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    /// Record kind such as `user_turn`, `assistant_turn` or `turn_failed`.
    pub kind: &'static str,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: &'static str, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// Sink for transcript records.
///
/// Implementations swallow their own I/O errors; logging never fails a turn.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every record.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
