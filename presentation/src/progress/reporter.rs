//! Progress reporting while the index is built

use colored::Colorize;
use docchat_application::BuildProgressNotifier;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner while documents load, then a bar over embedded chunks
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    /// Start spinning right away; loading gives no feedback until it finishes.
    pub fn new(source: impl std::fmt::Display) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("Loading and indexing {}...", source));
        pb.enable_steady_tick(Duration::from_millis(100));
        Self {
            bar: Mutex::new(Some(pb)),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl BuildProgressNotifier for ProgressReporter {
    fn on_documents_loaded(&self, documents: usize, chunks: usize) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            pb.set_style(Self::bar_style());
            pb.set_prefix("Embedding");
            pb.set_length(chunks as u64);
            pb.set_position(0);
            pb.set_message(format!("{} documents", documents));
        }
    }

    fn on_chunks_embedded(&self, done: usize, _total: usize) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            pb.set_position(done as u64);
        }
    }

    fn on_index_ready(&self, chunks: usize) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
            eprintln!("{} Index ready ({} chunks)", "v".green(), chunks);
        }
    }

    fn on_index_failed(&self, reason: &str) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.abandon_with_message(format!("{} {}", "x".red(), reason));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl BuildProgressNotifier for SimpleProgress {
    fn on_documents_loaded(&self, documents: usize, chunks: usize) {
        eprintln!(
            "{} Loaded {} documents ({} chunks)",
            "->".cyan(),
            documents,
            chunks
        );
    }

    fn on_chunks_embedded(&self, done: usize, total: usize) {
        if done == total {
            eprintln!("  {} embedded {} chunks", "v".green(), total);
        }
    }

    fn on_index_ready(&self, chunks: usize) {
        eprintln!("{} Index ready ({} chunks)", "v".green(), chunks);
    }

    fn on_index_failed(&self, reason: &str) {
        eprintln!("{} Index build failed: {}", "x".red(), reason);
    }
}
