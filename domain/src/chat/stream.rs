//! Streaming events for query engine responses.
//!
//! [`StreamEvent`] represents individual events in a streaming answer,
//! enabling real-time display of model output as it's generated.

/// An event in a streaming response.
///
/// Bridges infrastructure-level streaming (SSE chunks from the model API)
/// to the application layer. A well-formed stream is zero or more `Delta`
/// events followed by exactly one terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text fragment from the model.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// An error that occurred during streaming (signals stream end).
    Error(StreamFailure),
}

/// Why a stream stopped before completing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFailure {
    /// The model API rejected or aborted the request.
    ModelApi(String),
    /// The connection or response body broke.
    Transport(String),
}

impl std::fmt::Display for StreamFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamFailure::ModelApi(msg) => write!(f, "model API error: {msg}"),
            StreamFailure::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl StreamEvent {
    /// Returns the text content if this is a Delta or Completed event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) | StreamEvent::Completed(s) => Some(s),
            StreamEvent::Error(_) => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Error(_))
    }
}
