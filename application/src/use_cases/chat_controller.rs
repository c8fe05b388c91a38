//! Chat session controller.
//!
//! Drives one session through its render cycles:
//!
//! 1. [`submit`](ChatController::submit) appends a non-empty user question
//! 2. [`ensure_response`](ChatController::ensure_response) streams an answer
//!    if one is owed, forwarding each fragment to the output boundary
//! 3. [`render`](ChatController::render) hands the whole history to the output
//!
//! # Failure policy
//!
//! When the engine fails (before or during streaming), fragments already
//! shown are void: `on_turn_failed` is called, an error-notice assistant
//! turn is appended and the session returns to `AwaitingUser`. The partial
//! text never becomes a committed turn.

use super::app_context::AppContext;
use super::chat_session::ChatSession;
use crate::ports::chat_output::ChatOutput;
use crate::ports::conversation_logger::ConversationEvent;
use crate::ports::index::IndexError;
use crate::ports::query_engine::{QueryEngine, QueryError, StreamHandle};
use docchat_domain::{ChatState, ChatTurn, Question, StreamEvent, preview};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a render cycle outright.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Index unavailable: {0}")]
    IndexUnavailable(#[from] IndexError),
}

/// What [`ChatController::ensure_response`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// No question was pending; nothing happened.
    Idle,
    /// An answer was streamed and appended.
    Answered,
    /// The engine failed; an error notice was appended.
    Failed(QueryError),
}

/// Stateless controller over explicit [`ChatSession`] contexts.
#[derive(Clone)]
pub struct ChatController {
    context: Arc<AppContext>,
}

impl ChatController {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Arc<AppContext> {
        &self.context
    }

    /// Start a new session seeded with the greeting.
    pub fn start_session(&self) -> ChatSession {
        self.context.new_session()
    }

    /// Append a user question.
    ///
    /// Returns false without touching the history when the input is
    /// empty/whitespace or an earlier question is still unanswered.
    pub fn submit(&self, session: &mut ChatSession, input: &str) -> bool {
        let Some(question) = Question::try_new(input) else {
            debug!("Ignoring empty submission in session {}", session.id());
            return false;
        };

        if session.state() == ChatState::AwaitingAssistant {
            warn!(
                "Session {} still has an unanswered question; dropping new input",
                session.id()
            );
            return false;
        }

        info!(
            "Session {} question: {}",
            session.id(),
            preview(question.content(), 100)
        );
        self.context.conversation_logger().log(ConversationEvent::new(
            "user_turn",
            serde_json::json!({
                "session": session.id().to_string(),
                "content": question.content(),
            }),
        ));

        session.history.push_user(question);
        true
    }

    /// Produce the owed assistant turn, streaming it to `output`.
    ///
    /// A no-op returning [`ResponseOutcome::Idle`] when the session is
    /// awaiting the user; the engine is not touched in that case.
    pub async fn ensure_response(
        &self,
        session: &mut ChatSession,
        output: &dyn ChatOutput,
    ) -> Result<ResponseOutcome, ChatError> {
        let Some(question) = session.history.pending_question().map(str::to_owned) else {
            return Ok(ResponseOutcome::Idle);
        };

        let mut engine = self.acquire_engine(session).await?;

        output.on_stream_start();
        let result = match engine.stream_query(&question).await {
            Ok(handle) => Self::consume(handle, output).await,
            Err(e) => Err(e),
        };
        session.engine = Some(engine);

        let logger = self.context.conversation_logger();
        match result {
            Ok(answer) => {
                output.on_stream_end();
                debug!(
                    "Session {} answer ({} bytes): {}",
                    session.id(),
                    answer.len(),
                    preview(&answer, 100)
                );
                logger.log(ConversationEvent::new(
                    "assistant_turn",
                    serde_json::json!({
                        "session": session.id().to_string(),
                        "content": answer,
                    }),
                ));
                session.history.push_assistant(ChatTurn::assistant(answer));
                Ok(ResponseOutcome::Answered)
            }
            Err(e) => {
                warn!("Session {} turn failed: {}", session.id(), e);
                output.on_turn_failed(&e.to_string());
                logger.log(ConversationEvent::new(
                    "turn_failed",
                    serde_json::json!({
                        "session": session.id().to_string(),
                        "question": question,
                        "error": e.to_string(),
                    }),
                ));
                session.history.push_assistant(ChatTurn::error_notice(&e));
                Ok(ResponseOutcome::Failed(e))
            }
        }
    }

    /// Emit every turn, in order, to the output boundary.
    pub fn render(&self, session: &ChatSession, output: &dyn ChatOutput) {
        output.render(session.history.turns());
    }

    /// One full render cycle: optional submission, answer, render.
    pub async fn run_cycle(
        &self,
        session: &mut ChatSession,
        input: Option<&str>,
        output: &dyn ChatOutput,
    ) -> Result<ResponseOutcome, ChatError> {
        if let Some(input) = input {
            self.submit(session, input);
        }
        let outcome = self.ensure_response(session, output).await?;
        self.render(session, output);
        Ok(outcome)
    }

    /// Take the session's engine, creating it over the shared index on first use.
    async fn acquire_engine(
        &self,
        session: &mut ChatSession,
    ) -> Result<Box<dyn QueryEngine>, ChatError> {
        if let Some(engine) = session.engine.take() {
            return Ok(engine);
        }
        let index = self.context.index().await?;
        debug!("Creating query engine for session {}", session.id());
        Ok(self.context.create_engine(index))
    }

    /// Pull events until a terminal one, forwarding each fragment immediately.
    async fn consume(
        mut handle: StreamHandle,
        output: &dyn ChatOutput,
    ) -> Result<String, QueryError> {
        let mut accumulated = String::new();
        while let Some(event) = handle.next_event().await {
            match event {
                StreamEvent::Delta(fragment) => {
                    output.on_fragment(&fragment);
                    accumulated.push_str(&fragment);
                }
                StreamEvent::Completed(text) => {
                    if accumulated.is_empty() {
                        // Non-streaming engines deliver everything at once.
                        if !text.is_empty() {
                            output.on_fragment(&text);
                        }
                        return Ok(text);
                    }
                    return Ok(accumulated);
                }
                StreamEvent::Error(failure) => return Err(failure.into()),
            }
        }
        Err(QueryError::Transport(
            "stream closed before completion".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::use_cases::test_support::{
        CountingBuilder, OutputEvent, RecordingLogger, RecordingOutput, ScriptedFactory,
        context_with,
    };
    use docchat_domain::{Role, StreamFailure};

    const GREETING: &str = "Ask me a question about LaTeX!";

    fn fragments(parts: &[&str]) -> Vec<StreamEvent> {
        let mut events: Vec<StreamEvent> = parts
            .iter()
            .map(|p| StreamEvent::Delta(p.to_string()))
            .collect();
        events.push(StreamEvent::Completed(parts.concat()));
        events
    }

    fn controller(factory: Arc<ScriptedFactory>) -> (ChatController, Arc<CountingBuilder>) {
        let builder = Arc::new(CountingBuilder::new(3));
        let context = context_with(builder.clone(), factory, SessionConfig::default());
        (ChatController::new(Arc::new(context)), builder)
    }

    #[test]
    fn test_fresh_session_has_only_greeting() {
        let (controller, _) = controller(Arc::new(ScriptedFactory::new(vec![])));
        let session = controller.start_session();

        let turns = session.history().turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role(), Role::Assistant);
        assert_eq!(turns[0].content(), GREETING);
        assert_eq!(session.state(), ChatState::AwaitingUser);
    }

    #[test]
    fn test_submit_empty_is_ignored() {
        let (controller, _) = controller(Arc::new(ScriptedFactory::new(vec![])));
        let mut session = controller.start_session();

        assert!(!controller.submit(&mut session, ""));
        assert!(!controller.submit(&mut session, "   \n\t"));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.state(), ChatState::AwaitingUser);
    }

    #[tokio::test]
    async fn test_hyperref_scenario() {
        let factory = Arc::new(ScriptedFactory::new(vec![fragments(&[
            "The ",
            "hyperref ",
            "package.",
        ])]));
        let (controller, _) = controller(factory.clone());
        let mut session = controller.start_session();
        let output = RecordingOutput::new();

        assert!(controller.submit(&mut session, "What package adds hyperlinks?"));
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().turns()[1].role(), Role::User);
        assert_eq!(
            session.history().turns()[1].content(),
            "What package adds hyperlinks?"
        );
        assert_eq!(session.state(), ChatState::AwaitingAssistant);

        let outcome = controller
            .ensure_response(&mut session, &output)
            .await
            .unwrap();
        assert_eq!(outcome, ResponseOutcome::Answered);

        let last = session.history().last();
        assert_eq!(last.role(), Role::Assistant);
        assert_eq!(last.content(), "The hyperref package.");
        assert_eq!(session.state(), ChatState::AwaitingUser);
        assert_eq!(
            output.fragments(),
            vec!["The ".to_string(), "hyperref ".to_string(), "package.".to_string()]
        );
        assert_eq!(
            factory.questions(),
            vec!["What package adds hyperlinks?".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fragments_arrive_before_turn_is_rendered() {
        let factory = Arc::new(ScriptedFactory::new(vec![fragments(&["a", "b"])]));
        let (controller, _) = controller(factory);
        let mut session = controller.start_session();
        let output = RecordingOutput::new();

        controller
            .run_cycle(&mut session, Some("q"), &output)
            .await
            .unwrap();

        assert_eq!(
            output.events(),
            vec![
                OutputEvent::StreamStart,
                OutputEvent::Fragment("a".to_string()),
                OutputEvent::Fragment("b".to_string()),
                OutputEvent::StreamEnd,
                OutputEvent::Render(3),
            ]
        );
    }

    #[tokio::test]
    async fn test_history_alternates_after_n_questions() {
        let scripts = (0..4)
            .map(|i| {
                let n = i.to_string();
                fragments(&["answer ", n.as_str()])
            })
            .collect();
        let factory = Arc::new(ScriptedFactory::new(scripts));
        let (controller, _) = controller(factory);
        let mut session = controller.start_session();
        let output = RecordingOutput::new();

        for i in 0..4 {
            controller.submit(&mut session, &format!("question {i}"));
            controller
                .ensure_response(&mut session, &output)
                .await
                .unwrap();
        }

        let turns = session.history().turns();
        assert_eq!(turns.len(), 2 * 4 + 1);
        for (i, turn) in turns.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::Assistant } else { Role::User };
            assert_eq!(turn.role(), expected, "turn {i}");
        }
        assert_eq!(turns[8].content(), "answer 3");
    }

    #[tokio::test]
    async fn test_ensure_response_idle_does_not_touch_engine() {
        let factory = Arc::new(ScriptedFactory::new(vec![]));
        let (controller, builder) = controller(factory.clone());
        let mut session = controller.start_session();
        let output = RecordingOutput::new();

        for _ in 0..3 {
            let outcome = controller
                .ensure_response(&mut session, &output)
                .await
                .unwrap();
            assert_eq!(outcome, ResponseOutcome::Idle);
        }

        assert_eq!(session.history().len(), 1);
        assert_eq!(factory.engines_created(), 0);
        assert_eq!(factory.queries(), 0);
        assert_eq!(builder.calls(), 0);
        assert!(output.events().is_empty());
    }

    #[tokio::test]
    async fn test_engine_created_once_per_session() {
        let scripts = vec![fragments(&["one"]), fragments(&["two"])];
        let factory = Arc::new(ScriptedFactory::new(scripts));
        let (controller, _) = controller(factory.clone());
        let mut session = controller.start_session();
        let output = RecordingOutput::new();

        for q in ["first", "second"] {
            controller
                .run_cycle(&mut session, Some(q), &output)
                .await
                .unwrap();
        }

        assert!(session.has_engine());
        assert_eq!(factory.engines_created(), 1);
        assert_eq!(factory.queries(), 2);
    }

    #[tokio::test]
    async fn test_mid_stream_failure_commits_error_notice_not_partial() {
        let factory = Arc::new(ScriptedFactory::new(vec![vec![
            StreamEvent::Delta("The ".to_string()),
            StreamEvent::Error(StreamFailure::Transport("connection reset".to_string())),
        ]]));
        let (controller, _) = controller(factory);
        let mut session = controller.start_session();
        let output = RecordingOutput::new();

        controller.submit(&mut session, "What package adds hyperlinks?");
        let outcome = controller
            .ensure_response(&mut session, &output)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ResponseOutcome::Failed(QueryError::Transport("connection reset".to_string()))
        );
        let turns = session.history().turns();
        assert_eq!(turns.len(), 3);
        assert!(
            turns
                .iter()
                .all(|t| !(t.is_assistant() && t.content() == "The "))
        );
        assert!(turns[2].is_error_notice());
        assert!(turns[2].content().contains("connection reset"));
        assert_eq!(turns[1].content(), "What package adds hyperlinks?");
        assert_eq!(session.state(), ChatState::AwaitingUser);
        assert_eq!(output.fragments(), vec!["The ".to_string()]);
        assert!(output.events().contains(&OutputEvent::Failed(
            "Transport error: connection reset".to_string()
        )));
        assert!(!output.events().contains(&OutputEvent::StreamEnd));
    }

    #[tokio::test]
    async fn test_stream_closed_without_terminal_event_fails_turn() {
        let factory = Arc::new(ScriptedFactory::new(vec![vec![StreamEvent::Delta(
            "The ".to_string(),
        )]]));
        let (controller, _) = controller(factory);
        let mut session = controller.start_session();

        controller.submit(&mut session, "q");
        let outcome = controller
            .ensure_response(&mut session, &RecordingOutput::new())
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            ResponseOutcome::Failed(QueryError::Transport(_))
        ));
        assert!(session.history().last().is_error_notice());
    }

    #[tokio::test]
    async fn test_engine_refusal_fails_turn() {
        let factory = Arc::new(
            ScriptedFactory::new(vec![]).failing_with(QueryError::ModelApi("401".to_string())),
        );
        let (controller, _) = controller(factory);
        let mut session = controller.start_session();

        controller.submit(&mut session, "q");
        let outcome = controller
            .ensure_response(&mut session, &RecordingOutput::new())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ResponseOutcome::Failed(QueryError::ModelApi("401".to_string()))
        );
        assert_eq!(session.state(), ChatState::AwaitingUser);
        // Engine is kept for the next turn even after a failure.
        assert!(session.has_engine());
    }

    #[tokio::test]
    async fn test_session_usable_after_failure() {
        let factory = Arc::new(ScriptedFactory::new(vec![
            vec![StreamEvent::Error(StreamFailure::ModelApi("overloaded".to_string()))],
            fragments(&["fine"]),
        ]));
        let (controller, _) = controller(factory);
        let mut session = controller.start_session();
        let output = RecordingOutput::new();

        controller
            .run_cycle(&mut session, Some("first"), &output)
            .await
            .unwrap();
        let outcome = controller
            .run_cycle(&mut session, Some("second"), &output)
            .await
            .unwrap();

        assert_eq!(outcome, ResponseOutcome::Answered);
        assert_eq!(session.history().len(), 5);
        assert_eq!(session.history().last().content(), "fine");
    }

    #[tokio::test]
    async fn test_completed_without_deltas_is_still_shown() {
        let factory = Arc::new(ScriptedFactory::new(vec![vec![StreamEvent::Completed(
            "whole answer".to_string(),
        )]]));
        let (controller, _) = controller(factory);
        let mut session = controller.start_session();
        let output = RecordingOutput::new();

        controller
            .run_cycle(&mut session, Some("q"), &output)
            .await
            .unwrap();

        assert_eq!(output.fragments(), vec!["whole answer".to_string()]);
        assert_eq!(session.history().last().content(), "whole answer");
    }

    #[tokio::test]
    async fn test_submit_refused_while_answer_pending() {
        let factory = Arc::new(ScriptedFactory::new(vec![]));
        let builder = Arc::new(CountingBuilder::failing());
        let context = context_with(builder, factory, SessionConfig::default());
        let controller = ChatController::new(Arc::new(context));
        let mut session = controller.start_session();

        assert!(controller.submit(&mut session, "first"));
        let err = controller
            .ensure_response(&mut session, &RecordingOutput::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::IndexUnavailable(IndexError::NoDocuments(_))));

        // Still owed an answer; a second question must not stack up.
        assert_eq!(session.state(), ChatState::AwaitingAssistant);
        assert!(!controller.submit(&mut session, "second"));
        assert_eq!(session.history().len(), 2);
        assert!(!session.has_engine());
    }

    #[tokio::test]
    async fn test_failed_index_build_is_not_retried_by_later_sessions() {
        let factory = Arc::new(ScriptedFactory::new(vec![]));
        let builder = Arc::new(CountingBuilder::failing());
        let context = context_with(builder.clone(), factory.clone(), SessionConfig::default());
        let controller = ChatController::new(Arc::new(context));

        for _ in 0..3 {
            let mut session = controller.start_session();
            assert!(controller.submit(&mut session, "q"));
            let err = controller
                .ensure_response(&mut session, &RecordingOutput::new())
                .await
                .unwrap_err();
            assert!(matches!(err, ChatError::IndexUnavailable(IndexError::NoDocuments(_))));
        }

        assert_eq!(builder.calls(), 1);
        assert_eq!(factory.engines_created(), 0);
    }

    #[tokio::test]
    async fn test_render_emits_full_history_in_order() {
        let factory = Arc::new(ScriptedFactory::new(vec![fragments(&["x"])]));
        let (controller, _) = controller(factory);
        let mut session = controller.start_session();
        let output = RecordingOutput::new();

        controller
            .run_cycle(&mut session, Some("q"), &output)
            .await
            .unwrap();

        let rendered = output.last_render();
        assert_eq!(
            rendered,
            vec![
                (Role::Assistant, GREETING.to_string()),
                (Role::User, "q".to_string()),
                (Role::Assistant, "x".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_transcript_records_turns_and_failures() {
        let factory = Arc::new(ScriptedFactory::new(vec![
            fragments(&["Use ", "hyperref."]),
            vec![StreamEvent::Error(StreamFailure::Transport("reset".to_string()))],
        ]));
        let logger = Arc::new(RecordingLogger::default());
        let builder = Arc::new(CountingBuilder::new(2));
        let context = context_with(builder, factory, SessionConfig::default())
            .with_conversation_logger(logger.clone());
        let controller = ChatController::new(Arc::new(context));
        let mut session = controller.start_session();
        let output = RecordingOutput::new();

        for q in ["How do I add hyperlinks?", "And footnotes?"] {
            controller
                .run_cycle(&mut session, Some(q), &output)
                .await
                .unwrap();
        }

        assert_eq!(
            logger.kinds(),
            vec![
                "user_turn",
                "index_ready",
                "assistant_turn",
                "user_turn",
                "turn_failed"
            ]
        );
        let events = logger.events();
        assert_eq!(events[2].payload["content"], "Use hyperref.");
        assert_eq!(events[4].payload["question"], "And footnotes?");
        assert_eq!(events[4].payload["session"], session.id().to_string());
    }
}
