/// How a lookup phrase is compared against a stored name. Both sides arrive
/// already lowercased.
pub trait TextMatcher: Send + Sync {
    fn matches(&self, haystack: &str, needle: &str) -> bool;
}

/// "salah" matches "mohamed salah"; the empty phrase matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl TextMatcher for SubstringMatcher {
    fn matches(&self, haystack: &str, needle: &str) -> bool {
        haystack.contains(needle)
    }
}

/// Whole-field equality; handy when a caller already holds the canonical name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl TextMatcher for ExactMatcher {
    fn matches(&self, haystack: &str, needle: &str) -> bool {
        haystack == needle
    }
}
