//! Chat domain entities

use serde::{Deserialize, Serialize};

/// Prefix of the assistant turn recorded when a response could not be produced.
pub const ERROR_NOTICE_PREFIX: &str = "Sorry, I could not answer that: ";

/// Author of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exchange unit in a conversation (Entity)
///
/// Fields are private so a turn cannot be edited once it is in a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    role: Role,
    content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Assistant turn standing in for an answer that failed mid-stream.
    pub fn error_notice(reason: impl std::fmt::Display) -> Self {
        Self::assistant(format!("{ERROR_NOTICE_PREFIX}{reason}"))
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    pub fn is_error_notice(&self) -> bool {
        self.is_assistant() && self.content.starts_with(ERROR_NOTICE_PREFIX)
    }
}
