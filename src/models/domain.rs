use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored question/answer pair
///
/// A record without a question deserializes with an empty one, which
/// scores 0 against every query instead of failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: i64,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    pub fn new(id: i64, question: impl Into<String>, answer: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Administrator account allowed to manage FAQ entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string, never serialized back to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Lexical scoring weights
///
/// `recall` rewards candidates covering what the user asked; `precision`
/// penalizes candidates with a lot of extra wording. They should sum to 1.0
/// so scores stay within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub recall: f64,
    pub precision: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            recall: 0.6,
            precision: 0.4,
        }
    }
}
