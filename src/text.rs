//! Text normalization and numeric coercion.
//!
//! Pure functions shared by the locators, the extractor and the validator.

use crate::patterns::CURRENCY_ALIASES;

/// Collapse every whitespace run to a single space and trim both ends.
///
/// # Example
///
/// ```rust
/// use price_anchor::text::normalize;
///
/// assert_eq!(normalize(" a   b\n c "), "a b c");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize and lowercase text for case-insensitive comparison.
#[must_use]
pub fn fold(text: &str) -> String {
    normalize(text).to_lowercase()
}

/// Words of at least `min_len` characters, in order of appearance.
#[must_use]
pub fn significant_words(text: &str, min_len: usize) -> Vec<&str> {
    text.split_whitespace()
        .filter(|w| w.chars().count() >= min_len)
        .collect()
}

/// Extract a number from heterogeneous price text.
///
/// Everything except digits, commas and periods is dropped. Commas and periods
/// are treated alike and only the last one is kept as the decimal point, so
/// `"1,234.50"` reads as `1234.5` while `"1,234"` reads as `1.234`.
///
/// Returns `0.0` when no number can be read. Callers must treat `0.0` as
/// "no usable number", never as a real zero price.
///
/// # Example
///
/// ```rust
/// use price_anchor::text::coerce_number;
///
/// assert_eq!(coerce_number("$1,234.50"), 1234.5);
/// assert_eq!(coerce_number("abc"), 0.0);
/// ```
#[must_use]
pub fn coerce_number(text: &str) -> f64 {
    parse_number(text).unwrap_or(0.0)
}

/// Like [`coerce_number`], but reports an unreadable number as `None`.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let cleaned = match kept.rsplit_once('.') {
        Some((head, tail)) if head.contains('.') => format!("{}.{tail}", head.replace('.', "")),
        _ => kept,
    };

    cleaned.parse::<f64>().ok()
}

/// Map a currency glyph, code or word to its ISO code.
///
/// Matching is case-insensitive and ignores surrounding whitespace. Returns
/// `None` for currencies outside the alias table.
///
/// # Example
///
/// ```rust
/// use price_anchor::text::canonical_currency;
///
/// assert_eq!(canonical_currency("$"), Some("USD"));
/// assert_eq!(canonical_currency(" eur "), Some("EUR"));
/// assert_eq!(canonical_currency("CHF"), None);
/// ```
#[must_use]
pub fn canonical_currency(token: &str) -> Option<&'static str> {
    let upper = token.trim().to_uppercase();
    CURRENCY_ALIASES
        .iter()
        .find(|(code, aliases)| {
            *code == upper || aliases.iter().any(|alias| alias.to_uppercase() == upper)
        })
        .map(|(code, _)| *code)
}
