//! CLI command definitions

use clap::{Parser, ValueEnum};
use docchat_domain::{ChatMode, CorpusPreset};
use std::path::PathBuf;

/// Documentation corpus to chat about
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CorpusArg {
    /// The LaTeX2e reference manual
    Latex,
    /// Streamlit's open-source Python library docs
    Streamlit,
}

impl From<CorpusArg> for CorpusPreset {
    fn from(arg: CorpusArg) -> Self {
        match arg {
            CorpusArg::Latex => CorpusPreset::Latex,
            CorpusArg::Streamlit => CorpusPreset::Streamlit,
        }
    }
}

/// How follow-up questions are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Rewrite follow-ups into standalone questions using the conversation
    Condense,
    /// Retrieve with the question exactly as typed
    Direct,
}

impl From<ModeArg> for ChatMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Condense => ChatMode::CondenseQuestion,
            ModeArg::Direct => ChatMode::Direct,
        }
    }
}

/// CLI arguments for docchat
#[derive(Parser, Debug)]
#[command(name = "docchat")]
#[command(author, version, about = "Chat with a documentation corpus, grounded by retrieval")]
#[command(long_about = r#"
docchat indexes a documentation corpus once at startup and answers questions
about it, streaming each answer as it is generated. Follow-up questions are
rewritten into standalone questions using the conversation so far.

Configuration files are loaded from (in priority order):
1. DOCCHAT_* environment variables (e.g. DOCCHAT_LLM__MODEL)
2. --config <path>     Explicit config file
3. ./docchat.toml      Project-level config
4. ~/.config/docchat/config.toml   Global config

The API key is read from the OPENAI_API_KEY environment variable unless
configured otherwise.

Example:
  docchat
  docchat --corpus streamlit --source ./data/streamlit
  docchat "How do I add hyperlinks to a LaTeX document?"
"#)]
pub struct Cli {
    /// Ask a single question and exit instead of starting the chat
    #[arg(value_parser = parse_question)]
    pub question: Option<String>,

    /// Documentation corpus preset
    #[arg(long, value_enum, value_name = "CORPUS")]
    pub corpus: Option<CorpusArg>,

    /// Directory or file to index (defaults to the preset's data directory)
    #[arg(short, long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Chat completion model
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Follow-up handling
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Number of chunks retrieved per question
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub top_k: Option<u16>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append a JSONL transcript of the conversation to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}

/// A one-shot question must have some non-whitespace text.
fn parse_question(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        Err("the question cannot be empty".to_string())
    } else {
        Ok(raw.to_string())
    }
}
