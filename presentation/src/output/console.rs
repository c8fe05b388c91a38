//! Console output for chat sessions

use colored::Colorize;
use docchat_application::ChatOutput;
use docchat_domain::{ChatTurn, CorpusPreset, Role};
use std::io::{self, Write};
use std::sync::Mutex;

/// Formats chat turns for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Speaker label for a role
    pub fn speaker(role: Role) -> String {
        match role {
            Role::User => "You:".green().bold().to_string(),
            Role::Assistant => "Assistant:".cyan().bold().to_string(),
        }
    }

    /// One turn, label and content
    pub fn format_turn(turn: &ChatTurn) -> String {
        let content = if turn.is_error_notice() {
            turn.content().red().to_string()
        } else {
            turn.content().to_string()
        };
        format!("{} {}\n", Self::speaker(turn.role()), content)
    }

    /// Every turn, numbered, for `/history`
    pub fn format_history(turns: &[ChatTurn]) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "=== Conversation ===".cyan().bold()));
        for (i, turn) in turns.iter().enumerate() {
            let number = format!("[{}]", i + 1);
            output.push_str(&format!("{} {}", number.dimmed(), Self::format_turn(turn)));
        }
        output
    }

    /// Title banner and info line for a corpus
    pub fn banner(preset: CorpusPreset) -> String {
        let title = preset.title();
        let width = title.chars().count() + 4;
        let mut output = String::new();
        output.push('\n');
        output.push_str(&format!("╭{}╮\n", "─".repeat(width)));
        output.push_str(&format!("│  {}  │\n", title.bold()));
        output.push_str(&format!("╰{}╯\n", "─".repeat(width)));
        output.push_str(&format!("{} {}\n", "i".blue().bold(), preset.info().dimmed()));
        output
    }
}

#[derive(Debug, Default)]
struct RenderState {
    /// Turns already on screen
    shown: usize,
    /// The next assistant turn was already streamed to screen
    streamed: bool,
}

/// [`ChatOutput`] that writes to a terminal.
///
/// Fragments are written as they arrive. `render` prints only turns not yet
/// visible: user turns were echoed by the line editor, and a streamed answer
/// is already on screen, so neither is printed again.
pub struct ConsoleChatOutput<W: Write + Send = io::Stdout> {
    writer: Mutex<W>,
    state: Mutex<RenderState>,
}

impl ConsoleChatOutput {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleChatOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            state: Mutex::new(RenderState::default()),
        }
    }

    /// Forget what is on screen, e.g. after starting a new session.
    pub fn reset(&self) {
        if let Ok(mut state) = self.state.lock() {
            *state = RenderState::default();
        }
    }

    /// Treat the first `turns` turns as already visible.
    pub fn mark_shown(&self, turns: usize) {
        if let Ok(mut state) = self.state.lock() {
            state.shown = turns;
        }
    }

    fn write(&self, text: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.write_all(text.as_bytes());
            let _ = writer.flush();
        }
    }
}

impl<W: Write + Send> ChatOutput for ConsoleChatOutput<W> {
    fn on_stream_start(&self) {
        self.write(&format!("{} ", ConsoleFormatter::speaker(Role::Assistant)));
    }

    fn on_fragment(&self, fragment: &str) {
        self.write(fragment);
    }

    fn on_stream_end(&self) {
        self.write("\n");
        if let Ok(mut state) = self.state.lock() {
            state.streamed = true;
        }
    }

    fn on_turn_failed(&self, reason: &str) {
        self.write(&format!("\n{} {}\n", "x".red().bold(), reason.red()));
    }

    fn render(&self, turns: &[ChatTurn]) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if state.shown > turns.len() {
            // A different, shorter history; start over.
            *state = RenderState::default();
        }

        let mut output = String::new();
        let new_turns = &turns[state.shown..];
        let last = new_turns.len().saturating_sub(1);
        for (i, turn) in new_turns.iter().enumerate() {
            let streamed = state.streamed && i == last && turn.is_assistant();
            if turn.is_user() || streamed {
                continue;
            }
            output.push_str(&ConsoleFormatter::format_turn(turn));
        }
        state.shown = turns.len();
        state.streamed = false;
        drop(state);

        if !output.is_empty() {
            self.write(&output);
        }
    }
}
