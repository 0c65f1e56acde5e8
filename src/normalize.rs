//! Text normalization
//!
//! Every string that enters the lexicon, whether stored, searched or imported,
//! goes through [`normalize`] first, so comparisons downstream are plain
//! string equality.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::LazyLock;

use regex::Regex;

/// Characters that are neither word characters, whitespace nor the apostrophe
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s']").expect("valid regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Apostrophe look-alikes folded into a straight `'`
const QUOTE_VARIANTS: [char; 7] = ['\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}', '\u{2032}', '\u{02BC}', '`'];

/// Canonicalize raw text into its comparable form.
///
/// Lowercases, folds quote variants into `'`, strips everything that is not
/// a word character, whitespace or apostrophe, and collapses whitespace.
/// Empty or whitespace-only input yields `""`.
///
/// # Example
///
/// ```
/// use gadaoromo::normalize::normalize;
///
/// assert_eq!(normalize("  Akkam  Bulte! "), "akkam bulte");
/// assert_eq!(normalize("Ga’aa"), "ga'aa");
/// ```
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if QUOTE_VARIANTS.contains(&c) { '\'' } else { c })
        .collect();
    let stripped = DISALLOWED.replace_all(&folded, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Split already-normalized text into tokens.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// Whether already-normalized text is a single token
pub fn is_single_token(normalized: &str) -> bool {
    !normalized.is_empty() && !normalized.contains(' ')
}

/// Remove duplicates keeping the first occurrence of each item.
pub fn dedup_preserve_order<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
