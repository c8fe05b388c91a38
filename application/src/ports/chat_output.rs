//! Output boundary port
//!
//! Receives streamed fragments while an answer is being produced and the
//! full ordered history once per render cycle. Implementations live in the
//! presentation layer (console, web UI, test recorders).

use docchat_domain::ChatTurn;

/// Display sink for one chat session
pub trait ChatOutput: Send + Sync {
    /// An assistant answer is about to stream.
    fn on_stream_start(&self) {}

    /// One fragment of the answer, in arrival order.
    fn on_fragment(&self, fragment: &str);

    /// The answer finished streaming successfully.
    fn on_stream_end(&self) {}

    /// The answer could not be produced; partial fragments are void.
    fn on_turn_failed(&self, reason: &str);

    /// Every turn of the history, in order.
    fn render(&self, turns: &[ChatTurn]);
}

/// No-op output for headless use
pub struct NoChatOutput;

impl ChatOutput for NoChatOutput {
    fn on_fragment(&self, _fragment: &str) {}
    fn on_turn_failed(&self, _reason: &str) {}
    fn render(&self, _turns: &[ChatTurn]) {}
}
