//! Utility functions for selector pattern matching
//!
//! Attribute and substring helpers used by the hint rules.

use dom_query::NodeRef;

use crate::dom;

/// Case-sensitive check for any of `needles` inside `haystack`.
///
/// # Example
///
/// ```rust
/// use price_anchor::selector::utils;
///
/// assert!(utils::contains_any("product-price", &["price", "cost"]));
/// assert!(!utils::contains_any("Price", &["price"]));
/// ```
#[inline]
#[must_use]
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Whether the element's `class` attribute contains any of `needles`.
#[must_use]
pub fn class_contains_any(node: &NodeRef<'_>, needles: &[&str]) -> bool {
    contains_any(&dom::class_name(node), needles)
}

/// Whether the element's `id` attribute contains any of `needles`.
#[must_use]
pub fn id_contains_any(node: &NodeRef<'_>, needles: &[&str]) -> bool {
    contains_any(&dom::id(node), needles)
}

/// Case-insensitive substring check.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_uppercase().contains(&needle.to_uppercase())
}
