//! Currency Locator
//!
//! The currency is searched for as any of its spellings: the uppercased
//! input plus, for known currencies, the glyph, code and word aliases.
//!
//! Tiers, first success wins:
//! 1. Around the located price: the price element itself, then the own text
//!    of its parent, then its preceding and following element siblings.
//! 2. Elements whose class, then id, mentions `price` or `currency`.
//! 3. Document-wide scan of element own text, term by term. Glyphs must match
//!    exactly; codes and words match case-insensitively.

use dom_query::NodeRef;

use super::{first_hit, Strategy};
use crate::dom::{self, ParsedDocument};
use crate::options::Options;
use crate::path::LocationPath;
use crate::patterns::CURRENCY_ALIASES;
use crate::result::Field;
use crate::selector::{self, utils, CURRENCY_HINTED};
use crate::text::{canonical_currency, normalize};

/// Spellings of one currency, in search order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyTerms {
    terms: Vec<String>,
}

impl CurrencyTerms {
    /// Build the search terms for `currency`: the uppercased input followed
    /// by the aliases it does not already spell. Returns `None` for empty or
    /// whitespace-only input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use price_anchor::locator::currency::CurrencyTerms;
    ///
    /// let terms = CurrencyTerms::new("€").map(|t| t.terms().to_vec());
    /// assert_eq!(terms, Some(vec!["€".into(), "eur".into(), "euro".into()]));
    /// ```
    #[must_use]
    pub fn new(currency: &str) -> Option<Self> {
        let upper = currency.trim().to_uppercase();
        if upper.is_empty() {
            return None;
        }

        let mut terms = vec![upper];
        if let Some(code) = canonical_currency(currency) {
            let aliases = CURRENCY_ALIASES
                .iter()
                .find(|(known, _)| *known == code)
                .map(|(_, aliases)| *aliases)
                .unwrap_or_default();
            for alias in aliases {
                if !terms.iter().any(|term| term.eq_ignore_ascii_case(alias)) {
                    terms.push((*alias).to_string());
                }
            }
        }

        Some(Self { terms })
    }

    /// All search terms.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Whether any term occurs in `text`, ignoring case.
    #[must_use]
    pub fn occur_in(&self, text: &str) -> bool {
        let upper = text.to_uppercase();
        self.terms.iter().any(|term| upper.contains(&term.to_uppercase()))
    }
}

/// Whether a single term occurs in `text`: exactly for one-character glyphs,
/// case-insensitively for codes and words.
fn term_occurs(term: &str, text: &str) -> bool {
    if term.chars().count() == 1 {
        text.contains(term)
    } else {
        utils::contains_ignore_case(text, term)
    }
}

fn full_text(node: &NodeRef<'_>) -> String {
    normalize(&dom::text_content(node))
}

/// Tier 1: the price element and its immediate surroundings.
pub struct NearPriceTier<'a> {
    terms: &'a CurrencyTerms,
    price_path: Option<&'a LocationPath>,
}

impl<'a> NearPriceTier<'a> {
    #[must_use]
    pub fn new(terms: &'a CurrencyTerms, price_path: Option<&'a LocationPath>) -> Self {
        Self { terms, price_path }
    }
}

impl Strategy for NearPriceTier<'_> {
    fn name(&self) -> &'static str {
        "near-price"
    }

    fn locate(&self, doc: &ParsedDocument) -> Option<LocationPath> {
        let price = doc.resolve(self.price_path?)?;

        if self.terms.occur_in(&full_text(&price)) {
            return doc.path_of(&price);
        }

        let parent = dom::parent_element(&price).filter(|p| self.terms.occur_in(&normalize(&dom::own_text(p))));
        let previous = || dom::previous_element_sibling(&price).filter(|s| self.terms.occur_in(&full_text(s)));
        let next = || dom::next_element_sibling(&price).filter(|s| self.terms.occur_in(&full_text(s)));

        let hit = parent.or_else(previous).or_else(next)?;
        doc.path_of(&hit)
    }
}

/// Tier 2: elements with price/currency hints in class or id.
pub struct HintedTier<'a> {
    terms: &'a CurrencyTerms,
}

impl<'a> HintedTier<'a> {
    #[must_use]
    pub fn new(terms: &'a CurrencyTerms) -> Self {
        Self { terms }
    }
}

impl Strategy for HintedTier<'_> {
    fn name(&self) -> &'static str {
        "hinted"
    }

    fn locate(&self, doc: &ParsedDocument) -> Option<LocationPath> {
        let hit = selector::query_hinted(doc, CURRENCY_HINTED, |node| self.terms.occur_in(&full_text(node)))?;
        doc.path_of(&hit)
    }
}

/// Tier 3: document-wide scan, one term at a time.
pub struct LiteralTier<'a> {
    terms: &'a CurrencyTerms,
    budget: Option<usize>,
}

impl<'a> LiteralTier<'a> {
    #[must_use]
    pub fn new(terms: &'a CurrencyTerms, budget: Option<usize>) -> Self {
        Self { terms, budget }
    }
}

impl Strategy for LiteralTier<'_> {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn locate(&self, doc: &ParsedDocument) -> Option<LocationPath> {
        let elements = selector::scan(doc, self.budget);
        self.terms.terms().iter().find_map(|term| {
            let hit = selector::query(&elements, |node| term_occurs(term, &dom::own_text(node)))?;
            doc.path_of(&hit)
        })
    }
}

/// Locate the element displaying `currency`, using default options.
///
/// `price_path` is the previously located price, if any; the currency is
/// looked for next to it first.
#[must_use]
pub fn locate_currency(doc: &ParsedDocument, currency: &str, price_path: Option<&LocationPath>) -> Option<LocationPath> {
    locate_currency_with_options(doc, currency, price_path, &Options::default())
}

/// Locate the element displaying `currency`.
#[must_use]
pub fn locate_currency_with_options(
    doc: &ParsedDocument,
    currency: &str,
    price_path: Option<&LocationPath>,
    options: &Options,
) -> Option<LocationPath> {
    let terms = CurrencyTerms::new(currency)?;

    let near = NearPriceTier::new(&terms, price_path);
    let hinted = HintedTier::new(&terms);
    let literal = LiteralTier::new(&terms, options.scan_budget);
    first_hit(Field::Currency, doc, &[&near, &hinted, &literal])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> ParsedDocument {
        match ParsedDocument::parse(html) {
            Ok(doc) => doc,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    fn terms(currency: &str) -> CurrencyTerms {
        match CurrencyTerms::new(currency) {
            Some(terms) => terms,
            None => panic!("currency {currency:?} should be usable"),
        }
    }

    fn path(s: &str) -> LocationPath {
        match s.parse() {
            Ok(path) => path,
            Err(err) => panic!("{err:?}"),
        }
    }

    fn path_string(path: Option<LocationPath>) -> Option<String> {
        path.map(|p| p.to_string())
    }

    #[test]
    fn test_terms_for_known_and_unknown_currencies() {
        assert_eq!(terms("usd").terms(), ["USD", "$", "dollar"]);
        assert_eq!(terms(" Euro ").terms(), ["EURO", "€", "eur"]);
        assert_eq!(terms("€").terms(), ["€", "eur", "euro"]);
        assert_eq!(terms("£").terms(), ["£", "gbp", "pound"]);
        assert_eq!(terms("CHF").terms(), ["CHF"]);
        assert!(CurrencyTerms::new("").is_none());
        assert!(CurrencyTerms::new("  ").is_none());
    }

    #[test]
    fn test_terms_match_case_insensitively() {
        let usd = terms("USD");

        assert!(usd.occur_in("$19.99"));
        assert!(usd.occur_in("19.99 usd"));
        assert!(usd.occur_in("Twenty Dollars"));
        assert!(!usd.occur_in("19.99 €"));
    }

    #[test]
    fn test_near_price_checks_price_node_first() {
        let doc = parse(r#"<div>€<span class="price">€45.00</span><i>€</i></div>"#);
        let t = terms("€");
        let price = path("/html/body/div/span");

        let found = NearPriceTier::new(&t, Some(&price)).locate(&doc);
        assert_eq!(path_string(found).as_deref(), Some("/html/body/div/span"));
    }

    #[test]
    fn test_near_price_parent_own_text() {
        let doc = parse(r#"<p>Price: € <span class="price">45.00</span></p>"#);
        let t = terms("€");
        let price = path("/html/body/p/span");

        let found = NearPriceTier::new(&t, Some(&price)).locate(&doc);
        assert_eq!(path_string(found).as_deref(), Some("/html/body/p"));
    }

    #[test]
    fn test_near_price_prefers_preceding_sibling() {
        let doc = parse(r#"<div><b>€</b><span class="price">45.00</span><b>EUR</b></div>"#);
        let t = terms("€");
        let price = path("/html/body/div/span");

        let found = NearPriceTier::new(&t, Some(&price)).locate(&doc);
        assert_eq!(path_string(found).as_deref(), Some("/html/body/div/b[1]"));
    }

    #[test]
    fn test_near_price_following_sibling() {
        let doc = parse(r#"<div><span class="price">45.00</span> <small>€</small></div>"#);
        let price = path("/html/body/div/span");

        let found = locate_currency(&doc, "€", Some(&price));
        assert_eq!(path_string(found).as_deref(), Some("/html/body/div/small"));
    }

    #[test]
    fn test_near_price_unresolved_path_falls_through() {
        let doc = parse(r#"<div class="currency-box">USD</div>"#);
        let t = terms("USD");
        let stale = path("/html/body/section/span");

        assert!(NearPriceTier::new(&t, Some(&stale)).locate(&doc).is_none());
        assert!(NearPriceTier::new(&t, None).locate(&doc).is_none());

        let found = locate_currency(&doc, "USD", Some(&stale));
        assert_eq!(path_string(found).as_deref(), Some("/html/body/div"));
    }

    #[test]
    fn test_literal_tier_glyph_exact_code_case_insensitive() {
        let doc = parse("<p>Ships from the us</p><p>Total 12 usd</p>");
        let t = terms("USD");

        let found = LiteralTier::new(&t, None).locate(&doc);
        assert_eq!(path_string(found).as_deref(), Some("/html/body/p[2]"));
    }

    #[test]
    fn test_literal_tier_term_order() {
        let doc = parse("<p>Pay in pounds</p><p>£ 9</p>");

        // "GBP" misses, "£" hits the second paragraph before "pound" is tried
        let found = locate_currency(&doc, "GBP", None);
        assert_eq!(path_string(found).as_deref(), Some("/html/body/p[2]"));
    }

    #[test]
    fn test_empty_currency_is_none() {
        let doc = parse("<span class=\"price\">$1</span>");
        assert!(locate_currency(&doc, "", None).is_none());
        assert!(locate_currency(&doc, "   ", None).is_none());
    }
}
