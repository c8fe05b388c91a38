//! Presentation layer for docchat
//!
//! This crate contains the CLI definition, console output, index build
//! progress reporters, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplError};
pub use cli::commands::{Cli, CorpusArg, ModeArg};
pub use config::ReplConfig;
pub use output::console::{ConsoleChatOutput, ConsoleFormatter};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
