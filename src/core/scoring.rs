use crate::core::tokenizer::token_set;
use crate::models::ScoringWeights;
use std::collections::HashSet;

/// Calculate the lexical similarity (0-1) between a query and a candidate question
///
/// Scoring formula:
/// score = (
///     recall * 0.6 +        # share of query tokens found in the candidate
///     precision * 0.4       # share of candidate tokens found in the query
/// )
///
/// Returns exactly 0.0 when either side has no tokens.
pub fn calculate_match_score(query: &str, candidate_question: &str, weights: &ScoringWeights) -> f64 {
    score_token_sets(&token_set(query), &token_set(candidate_question), weights)
}

/// Score two pre-built token sets
///
/// The matcher builds the query set once and reuses it for every candidate.
#[inline]
pub fn score_token_sets(
    query_tokens: &HashSet<String>,
    candidate_tokens: &HashSet<String>,
    weights: &ScoringWeights,
) -> f64 {
    if query_tokens.is_empty() || candidate_tokens.is_empty() {
        return 0.0;
    }

    let overlap = query_tokens.intersection(candidate_tokens).count() as f64;
    let recall = overlap / query_tokens.len() as f64;
    let precision = overlap / candidate_tokens.len() as f64;

    weights.recall * recall + weights.precision * precision
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_saturates() {
        let weights = ScoringWeights::default();
        let score = calculate_match_score("what is ospoly", "What is OSPOLY?", &weights);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_overlap_is_zero() {
        let weights = ScoringWeights::default();
        let score = calculate_match_score("pay school fees", "How can I contact the registrar?", &weights);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_empty_side_is_zero() {
        let weights = ScoringWeights::default();
        assert_eq!(calculate_match_score("", "What is OSPOLY?", &weights), 0.0);
        assert_eq!(calculate_match_score("what is ospoly", "", &weights), 0.0);
        assert_eq!(calculate_match_score("...", "!!!", &weights), 0.0);
    }

    #[test]
    fn test_recall_weighted_above_precision() {
        let weights = ScoringWeights::default();
        // recall 2/3, precision 2/5
        let score = calculate_match_score(
            "admission requirements jamb",
            "What are the admission requirements?",
            &weights,
        );
        assert!((score - 0.56).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_duplicates_do_not_inflate_score() {
        let weights = ScoringWeights::default();
        let once = calculate_match_score("fees", "school fees deadline", &weights);
        let repeated = calculate_match_score("fees fees fees", "school fees deadline", &weights);
        assert_eq!(once, repeated);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoringWeights { recall: 1.0, precision: 0.0 };
        // every query token appears in the longer candidate
        let score = calculate_match_score("admission requirements", "What are the admission requirements?", &weights);
        assert!((score - 1.0).abs() < 1e-12);
    }
}
