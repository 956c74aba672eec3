use serde::{Deserialize, Serialize};

/// Chat reply returned by the ask endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub reply: String,
    pub meta: AskMeta,
}

/// Match details attached to every chat reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskMeta {
    /// Always serialized, as `null` when no entry was accepted
    pub matched: Option<MatchedFaq>,
    pub score: f64,
}

/// The accepted FAQ entry, without its answer (that is the reply)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedFaq {
    pub id: i64,
    pub question: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Issued admin bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Largest number of decimals a reported score keeps
pub const MAX_SCORE_PRECISION: u32 = 15;

/// Round a score for display, e.g. `round_score(0.37333, 3) == 0.373`
///
/// `decimals` is capped at [`MAX_SCORE_PRECISION`].
pub fn round_score(score: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_SCORE_PRECISION) as i32);
    (score * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.373_333, 3), 0.373);
        assert_eq!(round_score(0.56, 3), 0.56);
        assert_eq!(round_score(0.0, 3), 0.0);
        assert_eq!(round_score(1.0, 3), 1.0);
    }

    #[test]
    fn test_round_score_caps_decimals() {
        let score = round_score(0.373_333, u32::MAX);
        assert!(score.is_finite());
        assert_eq!(score, round_score(0.373_333, MAX_SCORE_PRECISION));
    }

    #[test]
    fn test_unmatched_meta_serializes_null() {
        let meta = AskMeta { matched: None, score: 0.0 };
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json["matched"].is_null());
        assert_eq!(json["score"], 0.0);
    }
}
