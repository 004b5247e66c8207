//! Name folding used for matching and ordering.
//!
//! Matching ignores case and accents: "José" and "jose" fold to the same key.
//! Ordering follows Brazilian Portuguese at base strength, which for names
//! amounts to comparing the folded letters.

use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Folds `text` into its search key: lowercase, accents stripped, trimmed.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Orders two display names ignoring case and accents.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold_chars(a).cmp(fold_chars(b))
}

fn fold_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}
