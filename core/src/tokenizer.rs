use lazy_static::lazy_static;
use regex::Regex;

use crate::index::Term;

lazy_static! {
    // Input is lowercased first, so ASCII letters are already a-z here.
    static ref RE: Regex = Regex::new(r"[a-z0-9]+").expect("valid regex");
}

/// Tokenize text into lowercase ASCII alphanumeric terms.
///
/// Any run of characters outside `[a-z0-9]` separates tokens and tokens of a
/// single character are dropped. Output keeps input order and duplicates.
/// Indexing and searching must both go through this function.
pub fn tokenize(text: &str) -> Vec<Term> {
    let lowered = text.to_lowercase();
    RE.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| token.len() > 1)
        .map(str::to_string)
        .collect()
}
