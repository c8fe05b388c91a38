//! Built-in corpus presets.
//!
//! Each preset bundles everything that differs between the supported
//! document sets: page title, banner, greeting, system prompt and the
//! default location of the documents.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A preconfigured document corpus (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusPreset {
    /// The LaTeX2e unofficial reference manual
    #[default]
    Latex,
    /// The Streamlit documentation
    Streamlit,
}

impl CorpusPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorpusPreset::Latex => "latex",
            CorpusPreset::Streamlit => "streamlit",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CorpusPreset::Latex => "Chat about LaTeX, powered by retrieval over the LaTeX2e manual",
            CorpusPreset::Streamlit => "Chat with the Streamlit docs",
        }
    }

    pub fn info(&self) -> &'static str {
        match self {
            CorpusPreset::Latex => {
                "This application is only for learning purpose and based on the LaTeX documentation (https://texdoc.org/serve/latex2e.pdf/0)."
            }
            CorpusPreset::Streamlit => {
                "Answers are grounded in the Streamlit documentation (https://docs.streamlit.io)."
            }
        }
    }

    /// First assistant turn of every session.
    pub fn greeting(&self) -> &'static str {
        match self {
            CorpusPreset::Latex => "Ask me a question about LaTeX!",
            CorpusPreset::Streamlit => {
                "Ask me a question about Streamlit's open-source Python library!"
            }
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            CorpusPreset::Latex => {
                "You are an expert on LaTeX and your job is to answer technical questions. \
                 Assume that all questions are related to LaTeX. \
                 Keep your answers technical and based on facts - do not hallucinate features."
            }
            CorpusPreset::Streamlit => {
                "You are an expert on the Streamlit Python library and your job is to answer technical questions. \
                 Assume that all questions are related to the Streamlit Python library. \
                 Keep your answers technical and based on facts - do not hallucinate features."
            }
        }
    }

    pub fn default_source(&self) -> &'static str {
        match self {
            CorpusPreset::Latex => "./data/latex2e",
            CorpusPreset::Streamlit => "./data/streamlit",
        }
    }
}

impl std::fmt::Display for CorpusPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CorpusPreset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latex" | "latex2e" | "tex" => Ok(CorpusPreset::Latex),
            "streamlit" | "st" => Ok(CorpusPreset::Streamlit),
            other => Err(DomainError::UnknownPreset(other.to_string())),
        }
    }
}
