use crate::core::{
    scoring::{calculate_match_score, score_token_sets},
    tokenizer::token_set,
};
use crate::models::{Faq, ScoringWeights};

/// Default minimum score for a candidate to count as an answer
pub const DEFAULT_THRESHOLD: f64 = 0.25;

/// Result of the matching process
///
/// `score` is reported even when nothing was accepted; it is 0.0 for an
/// empty query or an empty candidate collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub matched: Option<&'a Faq>,
    pub score: f64,
}

impl MatchResult<'_> {
    fn none(score: f64) -> Self {
        Self { matched: None, score }
    }
}

/// Selects the stored FAQ whose question best matches a free-text query
///
/// The matcher holds only its configuration, so one instance can be cloned
/// into every worker and called concurrently.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    threshold: f64,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, threshold: f64) -> Self {
        Self { weights, threshold }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_THRESHOLD)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a single query against a single candidate question
    pub fn score(&self, query: &str, candidate_question: &str) -> f64 {
        calculate_match_score(query, candidate_question, &self.weights)
    }

    /// Find the best candidate for a query
    ///
    /// Every candidate is scored; the first one reaching the highest score
    /// wins ties. The winner is returned only if its score reaches the
    /// threshold.
    ///
    /// # Arguments
    /// * `query` - Raw user question
    /// * `candidates` - Stored FAQ entries, in the order ties are resolved
    pub fn find_best<'a, I>(&self, query: &str, candidates: I) -> MatchResult<'a>
    where
        I: IntoIterator<Item = &'a Faq>,
    {
        if query.trim().is_empty() {
            return MatchResult::none(0.0);
        }

        let query_tokens = token_set(query);

        let mut best: Option<&'a Faq> = None;
        let mut best_score = 0.0;

        for candidate in candidates {
            let score = score_token_sets(&query_tokens, &token_set(&candidate.question), &self.weights);
            if score > best_score {
                best_score = score;
                best = Some(candidate);
            }
        }

        match best {
            Some(faq) if best_score >= self.threshold => MatchResult {
                matched: Some(faq),
                score: best_score,
            },
            _ => MatchResult::none(best_score),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
