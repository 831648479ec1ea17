//! Selector Infrastructure
//!
//! Element predicates ("rules") and document-order queries shared by the
//! field locators. Rules are plain functions over a node; the locators combine
//! them with value-specific checks.

use dom_query::NodeRef;

use crate::dom::{self, ParsedDocument};
use crate::patterns::{CURRENCY_HINTS, PRICE_HINTS, TITLE_HINTS};

pub mod utils;

/// A selector rule that tests if an element matches certain criteria.
pub type Rule = fn(&NodeRef<'_>) -> bool;

// ============================================================
// HINT RULES
// ============================================================

/// Title hint rules, class pass before id pass.
pub static TITLE_HINTED: &[Rule] = &[title_class_rule, title_id_rule];

/// Price hint rules, class pass before id pass.
pub static PRICE_HINTED: &[Rule] = &[price_class_rule, price_id_rule];

/// Currency hint rules, class pass before id pass.
pub static CURRENCY_HINTED: &[Rule] = &[currency_class_rule, currency_id_rule];

/// Class mentions `product`, `title` or `name`.
#[must_use]
pub fn title_class_rule(node: &NodeRef<'_>) -> bool {
    utils::class_contains_any(node, TITLE_HINTS)
}

/// Id mentions `product`, `title` or `name`.
#[must_use]
pub fn title_id_rule(node: &NodeRef<'_>) -> bool {
    utils::id_contains_any(node, TITLE_HINTS)
}

/// Class mentions `price`, `cost` or `amount`.
#[must_use]
pub fn price_class_rule(node: &NodeRef<'_>) -> bool {
    utils::class_contains_any(node, PRICE_HINTS)
}

/// Id mentions `price`, `cost` or `amount`.
#[must_use]
pub fn price_id_rule(node: &NodeRef<'_>) -> bool {
    utils::id_contains_any(node, PRICE_HINTS)
}

/// Class mentions `price` or `currency`.
#[must_use]
pub fn currency_class_rule(node: &NodeRef<'_>) -> bool {
    utils::class_contains_any(node, CURRENCY_HINTS)
}

/// Id mentions `price` or `currency`.
#[must_use]
pub fn currency_id_rule(node: &NodeRef<'_>) -> bool {
    utils::id_contains_any(node, CURRENCY_HINTS)
}

// ============================================================
// QUERIES
// ============================================================

/// First node, in the given order, for which `predicate` holds.
#[must_use]
pub fn query<'a, P>(nodes: &[NodeRef<'a>], predicate: P) -> Option<NodeRef<'a>>
where
    P: Fn(&NodeRef<'a>) -> bool,
{
    nodes.iter().copied().find(|node| predicate(node))
}

/// All nodes, in the given order, for which `predicate` holds.
#[must_use]
pub fn query_all<'a, P>(nodes: &[NodeRef<'a>], predicate: P) -> Vec<NodeRef<'a>>
where
    P: Fn(&NodeRef<'a>) -> bool,
{
    nodes.iter().copied().filter(|node| predicate(node)).collect()
}

/// Run each hint rule as a separate pass over the document and return the
/// first element that satisfies both the rule and `accept`.
///
/// Every element matching the first rule is tried before any element of the
/// second rule.
#[must_use]
pub fn query_hinted<'a, P>(doc: &'a ParsedDocument, rules: &[Rule], accept: P) -> Option<NodeRef<'a>>
where
    P: Fn(&NodeRef<'a>) -> bool,
{
    let elements = doc.elements();
    rules
        .iter()
        .find_map(|rule| query(&elements, |node| rule(node) && accept(node)))
}

/// Rendered elements for a document-wide scan, in document order, bounded by
/// `budget` visited elements.
#[must_use]
pub fn scan(doc: &ParsedDocument, budget: Option<usize>) -> Vec<NodeRef<'_>> {
    let elements = doc.elements();
    let limit = budget.unwrap_or(usize::MAX);
    if elements.len() > limit {
        log::debug!(
            "Scan budget exhausted: visiting {limit} of {} elements",
            elements.len()
        );
    }

    elements
        .into_iter()
        .take(limit)
        .filter(|node| !dom::is_unrendered(node))
        .collect()
}
