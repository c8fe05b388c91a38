//! Prompt templates for retrieval-augmented answering

use crate::chat::entities::{ChatTurn, Role};

/// Template used to rewrite a follow-up into a standalone question.
pub const CONDENSE_QUESTION_TEMPLATE: &str = r#"Given a conversation (between Human and Assistant) and a follow up message from Human, rewrite the message to be a standalone question that captures all relevant context from the conversation.

<Chat History>
{chat_history}

<Follow Up Message>
{question}

<Standalone question>
"#;

/// Template for the system message that carries retrieved context.
pub const CONTEXT_TEMPLATE: &str = r#"Context information is below.
---------------------
{context}
---------------------
Given the context information and not prior knowledge, answer the query."#;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Render the condense prompt from prior turns and the new question.
    pub fn condense(history: &[ChatTurn], question: &str) -> String {
        let transcript = history
            .iter()
            .map(|turn| {
                let speaker = match turn.role() {
                    Role::User => "Human",
                    Role::Assistant => "Assistant",
                };
                format!("{}: {}", speaker, turn.content())
            })
            .collect::<Vec<_>>()
            .join("\n");

        fill(
            CONDENSE_QUESTION_TEMPLATE,
            &[("chat_history", &transcript), ("question", question)],
        )
    }

    /// Render the system message: persona prompt followed by retrieved chunks.
    pub fn context<S: AsRef<str>>(system_prompt: &str, chunks: &[S]) -> String {
        let context = chunks
            .iter()
            .map(|c| c.as_ref().trim())
            .collect::<Vec<_>>()
            .join("\n\n");

        let body = fill(CONTEXT_TEMPLATE, &[("context", &context)]);
        if system_prompt.trim().is_empty() {
            body
        } else {
            format!("{}\n\n{}", system_prompt.trim(), body)
        }
    }
}

/// Substitute `{name}` placeholders in one left-to-right pass.
///
/// Inserted values are never rescanned, so a value containing `{question}`
/// stays literal. Unknown placeholders are kept as written.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
