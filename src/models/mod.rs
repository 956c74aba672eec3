// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Admin, Faq, ScoringWeights};
pub use requests::{AskRequest, FaqRequest, LoginRequest};
pub use responses::{round_score, AskMeta, AskResponse, ErrorResponse, HealthResponse, LoginResponse, MatchedFaq, MAX_SCORE_PRECISION};
