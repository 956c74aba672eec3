use serde::{Deserialize, Serialize};
use validator::Validate;

/// Chat question sent by the widget
///
/// A missing or null message is treated like an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl AskRequest {
    /// The message with surrounding whitespace removed
    pub fn trimmed_message(&self) -> &str {
        self.message.as_deref().unwrap_or_default().trim()
    }
}

/// Admin login credentials
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body for creating or replacing a FAQ entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FaqRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub question: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub answer: String,
}

impl FaqRequest {
    /// Question and answer trimmed the way they are stored
    pub fn trimmed(&self) -> (&str, &str) {
        (self.question.trim(), self.answer.trim())
    }
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}
