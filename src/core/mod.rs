// Core algorithm exports
pub mod matcher;
pub mod scoring;
pub mod tokenizer;

pub use matcher::{MatchResult, Matcher, DEFAULT_THRESHOLD};
pub use scoring::{calculate_match_score, score_token_sets};
pub use tokenizer::{normalize, token_set};
