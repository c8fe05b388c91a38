//! Engine factory wired to a language model.

use super::condense::CondenseQuestionEngine;
use super::language_model::LanguageModel;
use docchat_application::{QueryEngine, QueryEngineFactory, RetrievalIndex};
use docchat_domain::EngineOptions;
use std::sync::Arc;

/// Creates one [`CondenseQuestionEngine`] per session, all sharing the
/// same model client and system prompt.
pub struct OpenAiEngineFactory {
    model: Arc<dyn LanguageModel>,
    system_prompt: String,
}

impl OpenAiEngineFactory {
    pub fn new(model: Arc<dyn LanguageModel>, system_prompt: impl Into<String>) -> Self {
        Self {
            model,
            system_prompt: system_prompt.into(),
        }
    }
}

impl QueryEngineFactory for OpenAiEngineFactory {
    fn create_engine(
        &self,
        index: Arc<dyn RetrievalIndex>,
        options: EngineOptions,
    ) -> Box<dyn QueryEngine> {
        Box::new(CondenseQuestionEngine::new(
            index,
            Arc::clone(&self.model),
            options,
            self.system_prompt.clone(),
        ))
    }
}
