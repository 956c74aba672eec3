//! FAQBot - FAQ-answering chatbot service
//!
//! A free-text question is tokenized and compared against stored FAQ
//! questions by weighted token overlap; the best entry above a threshold
//! answers the question, otherwise a fallback reply is returned.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{normalize, MatchResult, Matcher};
pub use models::{AskRequest, AskResponse, Faq, ScoringWeights};
