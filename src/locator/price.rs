//! Price Locator
//!
//! The price is searched for as literal text in three renderings of its
//! numeric value:
//!
//! - plain: shortest float form with at least one decimal (`19.99`, `20.0`)
//! - trimmed: two decimals with trailing zeros and point removed (`19.99`, `20`)
//! - integer: truncated whole part (`19`, `20`)
//!
//! Tiers, first success wins:
//! 1. Elements whose class, then id, mentions `price`, `cost` or `amount` and
//!    whose text contains any rendering.
//! 2. Document-wide scan of element own text for each rendering in the order
//!    plain, trimmed, integer. Among the hits for one rendering, an element
//!    whose text also shows a currency glyph or code is preferred.

use dom_query::NodeRef;

use super::{first_hit, Strategy};
use crate::dom::{self, ParsedDocument};
use crate::options::Options;
use crate::path::LocationPath;
use crate::patterns::CURRENCY_MARKER;
use crate::result::{Field, PriceValue};
use crate::selector::{self, PRICE_HINTED};
use crate::text::normalize;

/// Textual renderings of a price, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTarget {
    plain: String,
    trimmed: String,
    integer: String,
}

impl PriceTarget {
    /// Prepare `price` for matching. Returns `None` when no usable number can
    /// be read from it.
    #[must_use]
    pub fn new(price: &PriceValue) -> Option<Self> {
        let value = price.coerce();
        if value == 0.0 || !value.is_finite() {
            return None;
        }

        let plain = float_repr(value);
        let fixed = format!("{value:.2}");
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.').to_string();
        let integer = format!("{:.0}", value.trunc());

        Some(Self { plain, trimmed, integer })
    }

    /// Renderings in the order the document-wide tier tries them.
    #[must_use]
    pub fn renderings(&self) -> [&str; 3] {
        [&self.plain, &self.trimmed, &self.integer]
    }

    /// Whether any rendering occurs in `text`.
    #[must_use]
    pub fn occurs_in(&self, text: &str) -> bool {
        self.renderings().iter().any(|r| text.contains(r))
    }
}

/// Shortest round-trip form of a float, always carrying a decimal point.
fn float_repr(value: f64) -> String {
    let repr = value.to_string();
    if repr.contains('.') {
        repr
    } else {
        format!("{repr}.0")
    }
}

/// Tier 1: elements with price/cost/amount hints in class or id.
pub struct HintedTier<'a> {
    target: &'a PriceTarget,
}

impl<'a> HintedTier<'a> {
    #[must_use]
    pub fn new(target: &'a PriceTarget) -> Self {
        Self { target }
    }
}

impl Strategy for HintedTier<'_> {
    fn name(&self) -> &'static str {
        "hinted"
    }

    fn locate(&self, doc: &ParsedDocument) -> Option<LocationPath> {
        let hit = selector::query_hinted(doc, PRICE_HINTED, |node| {
            self.target.occurs_in(&normalize(&dom::text_content(node)))
        })?;
        doc.path_of(&hit)
    }
}

/// Tier 2: document-wide literal scan.
pub struct LiteralTier<'a> {
    target: &'a PriceTarget,
    budget: Option<usize>,
}

impl<'a> LiteralTier<'a> {
    #[must_use]
    pub fn new(target: &'a PriceTarget, budget: Option<usize>) -> Self {
        Self { target, budget }
    }
}

fn shows_currency(node: &NodeRef<'_>) -> bool {
    CURRENCY_MARKER.is_match(&normalize(&dom::text_content(node)))
}

impl Strategy for LiteralTier<'_> {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn locate(&self, doc: &ParsedDocument) -> Option<LocationPath> {
        let elements = selector::scan(doc, self.budget);
        self.target.renderings().iter().find_map(|rendering| {
            let hits = selector::query_all(&elements, |node| {
                normalize(&dom::own_text(node)).contains(rendering)
            });
            let best = selector::query(&hits, shows_currency).or_else(|| hits.first().copied())?;
            doc.path_of(&best)
        })
    }
}

/// Locate the element displaying `price`, using default options.
///
/// # Example
///
/// ```rust
/// use price_anchor::{locator, ParsedDocument, PriceValue};
///
/// let doc = ParsedDocument::parse(r#"<span class="price">$19.99</span>"#)?;
/// let path = locator::locate_price(&doc, &PriceValue::from(19.99));
/// assert_eq!(path.map(|p| p.to_string()).as_deref(), Some("/html/body/span"));
/// # Ok::<(), price_anchor::Error>(())
/// ```
#[must_use]
pub fn locate_price(doc: &ParsedDocument, price: &PriceValue) -> Option<LocationPath> {
    locate_price_with_options(doc, price, &Options::default())
}

/// Locate the element displaying `price`.
#[must_use]
pub fn locate_price_with_options(doc: &ParsedDocument, price: &PriceValue, options: &Options) -> Option<LocationPath> {
    let Some(target) = PriceTarget::new(price) else {
        log::debug!("price {price:?} has no usable number");
        return None;
    };

    let hinted = HintedTier::new(&target);
    let literal = LiteralTier::new(&target, options.scan_budget);
    first_hit(Field::Price, doc, &[&hinted, &literal])
}
