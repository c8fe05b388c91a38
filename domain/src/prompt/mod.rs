//! Prompt domain
//!
//! Templates for question condensation and context-grounded answering.

mod template;

pub use template::{CONDENSE_QUESTION_TEMPLATE, CONTEXT_TEMPLATE, PromptTemplate};
