use crate::error::QueryError;

/// Words that carry the question, not the name.
pub const STOP_WORDS: &[&str] = &[
    "stats", "goals", "age", "position", "show", "tell", "info", "data", "how", "many", "does",
    "have",
];

/// Rewritten to "and" before splitting. Matched anywhere in the text, so
/// "haaland" splits too.
pub const CONNECTIVES: &[&str] = &["compare", "versus", "vs", "with"];

/// "Mohamed Salah stats" -> "mohamed salah".
pub fn extract_single_player(text: &str) -> Result<String, QueryError> {
    let lowered = text.trim().to_lowercase();
    let name = lowered
        .split_whitespace()
        .filter(|token| !STOP_WORDS.contains(token))
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        return Err(QueryError::Extraction);
    }
    Ok(name)
}

/// "salah vs palmer" -> ("salah", "palmer"). Anything other than exactly two
/// non-empty sides is "not a comparison", not an error.
pub fn extract_comparison_pair(text: &str) -> Option<(String, String)> {
    let mut lowered = text.trim().to_lowercase();
    for word in CONNECTIVES {
        lowered = lowered.replace(word, "and");
    }
    let mut sides = lowered
        .split("and")
        .map(|side| side.trim_matches(|c: char| c.is_whitespace() || c == '.' || c == ','))
        .filter(|side| !side.is_empty());
    let first = sides.next()?.to_string();
    let second = sides.next()?.to_string();
    if sides.next().is_some() {
        return None;
    }
    Some((first, second))
}
