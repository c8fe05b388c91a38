//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface over a
//! [`ChatController`](docchat_application::ChatController).

mod repl;

pub use repl::{ChatRepl, ReplCommand, ReplError};
