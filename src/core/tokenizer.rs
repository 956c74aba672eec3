use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// A token is a maximal run of lowercase ASCII letters, digits or apostrophes.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-z0-9']+").expect("token pattern is a valid regex")
});

/// Split text into comparable tokens
///
/// The input is lowercased first; every character outside `[a-z0-9']`
/// acts as a separator and is dropped. Order and duplicates are preserved.
///
/// # Example
/// ```
/// use faqbot::core::normalize;
/// assert_eq!(normalize("What is OSPOLY?"), vec!["what", "is", "ospoly"]);
/// ```
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Deduplicated tokens of `text`, the form used for scoring
pub fn token_set(text: &str) -> HashSet<String> {
    normalize(text).into_iter().collect()
}
