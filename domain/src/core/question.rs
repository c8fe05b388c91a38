//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user-submitted question (Value Object)
///
/// Always non-empty: whitespace-only input never becomes a `Question`,
/// which is how the input boundary keeps empty submissions out of the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if invalid
    ///
    /// Surrounding whitespace is trimmed.
    pub fn try_new(content: impl AsRef<str>) -> Option<Self> {
        let content = content.as_ref().trim();
        if content.is_empty() {
            None
        } else {
            Some(Self {
                content: content.to_string(),
            })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::try_new(s).ok_or(DomainError::EmptyQuestion)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::try_new(s).ok_or(DomainError::EmptyQuestion)
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("What package adds hyperlinks?").unwrap();
        assert_eq!(q.content(), "What package adds hyperlinks?");
    }

    #[test]
    fn test_question_is_trimmed() {
        let q = Question::try_new("  \\section vs \\chapter?\n").unwrap();
        assert_eq!(q.content(), "\\section vs \\chapter?");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new("   ").is_none());
        assert!(Question::try_new("\t\n").is_none());
    }

    #[test]
    fn test_try_from_reports_domain_error() {
        let err = Question::try_from(" ").unwrap_err();
        assert_eq!(err, DomainError::EmptyQuestion);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<Question>("\"  \"").is_err());
        let q: Question = serde_json::from_str("\"st.cache_resource?\"").unwrap();
        assert_eq!(q.content(), "st.cache_resource?");
    }
}
