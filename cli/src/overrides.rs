//! Command-line overrides on top of the loaded configuration

use docchat_domain::{ChatMode, CorpusPreset};
use docchat_infrastructure::FileConfig;
use docchat_presentation::Cli;

/// Apply flags given on the command line; they win over every config source.
pub fn apply(cli: &Cli, config: &mut FileConfig) {
    if let Some(corpus) = cli.corpus {
        let preset = CorpusPreset::from(corpus);
        // A configured source belongs to the configured corpus
        if config.preset().ok() != Some(preset) {
            config.corpus.source = None;
        }
        config.corpus.preset = preset.as_str().to_string();
    }
    if let Some(source) = &cli.source {
        config.corpus.source = Some(source.display().to_string());
    }
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(mode) = cli.mode {
        config.chat.mode = ChatMode::from(mode).as_str().to_string();
    }
    if let Some(top_k) = cli.top_k {
        config.retrieval.top_k = usize::from(top_k);
    }
    if let Some(path) = &cli.conversation_log {
        config.logging.conversation_log = Some(path.display().to_string());
    }
}
