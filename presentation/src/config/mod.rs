//! Presentation-level configuration
//!
//! Configuration for REPL behavior.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Default)]
pub struct ReplConfig {
    /// Path to history file; the platform data directory when unset
    pub history_file: Option<PathBuf>,
}

impl ReplConfig {
    /// Where line-editor history is kept, if anywhere.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("docchat").join("history.txt")))
    }
}
