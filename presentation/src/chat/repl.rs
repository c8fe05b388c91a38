//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::output::console::{ConsoleChatOutput, ConsoleFormatter};
use docchat_application::{ChatController, ChatError, ChatSession, ResponseOutcome};
use docchat_domain::CorpusPreset;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ReplError {
    #[error("line editor error: {0}")]
    Readline(#[from] ReadlineError),

    #[error(transparent)]
    Chat(#[from] ChatError),
}

/// What a slash command asks the loop to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    History,
    NewSession,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`.
    pub fn parse(line: &str) -> Self {
        match line.split_whitespace().next().unwrap_or(line) {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/history" => ReplCommand::History,
            "/new" | "/reset" => ReplCommand::NewSession,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: ChatController,
    preset: CorpusPreset,
    config: ReplConfig,
    output: ConsoleChatOutput,
}

impl ChatRepl {
    pub fn new(controller: ChatController, preset: CorpusPreset) -> Self {
        Self {
            controller,
            preset,
            config: ReplConfig::default(),
            output: ConsoleChatOutput::stdout(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Answer one question in a fresh session and return how it went.
    ///
    /// Only the answer is printed; the greeting is skipped. Returns
    /// [`ResponseOutcome::Idle`] when `question` has no text to submit.
    pub async fn ask(&self, question: &str) -> Result<ResponseOutcome, ChatError> {
        let mut session = self.controller.start_session();
        self.output.mark_shown(session.history().len());
        self.controller
            .run_cycle(&mut session, Some(question), &self.output)
            .await
    }

    /// Run the interactive REPL until `/quit` or end of input.
    ///
    /// Returns an error only when the chat cannot continue at all (the index
    /// became unavailable or the terminal failed); failed answers are shown
    /// in the conversation and the loop goes on.
    pub async fn run(&self) -> Result<(), ReplError> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();
        let mut session = self.controller.start_session();
        self.controller.render(&session, &self.output);

        let result = self.read_loop(&mut rl, &mut session).await;

        if let Some(ref path) = history_path
            && let Err(e) = rl.save_history(path)
        {
            warn!("Could not save history to {}: {}", path.display(), e);
        }

        result
    }

    async fn read_loop(
        &self,
        rl: &mut DefaultEditor,
        session: &mut ChatSession,
    ) -> Result<(), ReplError> {
        loop {
            let line = match rl.readline(">>> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            };

            let line = line.trim();

            // Empty input is never dispatched
            if line.is_empty() {
                continue;
            }

            if line.starts_with('/') {
                match ReplCommand::parse(line) {
                    ReplCommand::Quit => {
                        println!("Bye!");
                        return Ok(());
                    }
                    ReplCommand::Help => Self::print_help(),
                    ReplCommand::History => {
                        print!("{}", ConsoleFormatter::format_history(session.history().turns()));
                    }
                    ReplCommand::NewSession => {
                        *session = self.controller.start_session();
                        self.output.reset();
                        self.controller.render(session, &self.output);
                    }
                    ReplCommand::Unknown(cmd) => {
                        println!("Unknown command: {}", cmd);
                        println!("Type /help for available commands");
                    }
                }
                continue;
            }

            let _ = rl.add_history_entry(line);

            match self
                .controller
                .run_cycle(session, Some(line), &self.output)
                .await?
            {
                ResponseOutcome::Failed(e) => debug!("Turn failed: {}", e),
                outcome => debug!("Cycle finished: {:?}", outcome),
            }
            println!();
        }
    }

    fn print_welcome(&self) {
        print!("{}", welcome_text(self.preset));
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show the conversation so far");
        println!("  /new              - Start a new conversation");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }
}

/// Banner plus the short command list shown at startup.
fn welcome_text(preset: CorpusPreset) -> String {
    let mut text = ConsoleFormatter::banner(preset);
    text.push_str("\nCommands:\n");
    for (command, about) in [
        ("/help", "Show this help"),
        ("/history", "Show the conversation so far"),
        ("/new", "Start a new conversation"),
        ("/quit", "Exit chat"),
    ] {
        text.push_str(&format!("  {command:<9} - {about}\n"));
    }
    text.push('\n');
    text
}
