//! Query engine adapters.

mod condense;
mod factory;
mod language_model;

pub use condense::CondenseQuestionEngine;
pub use factory::OpenAiEngineFactory;
pub use language_model::{LanguageModel, PromptMessage, PromptRole};
