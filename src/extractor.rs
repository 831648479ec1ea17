//! Value Extractor
//!
//! Re-reads title, price and currency from a document through a previously
//! synthesized [`SelectorSet`]. Each field is resolved on its own; a path
//! that no longer resolves leaves only that field empty.

use dom_query::NodeRef;

use crate::dom::{self, ParsedDocument};
use crate::options::Options;
use crate::patterns::{CURRENCY_TOKEN, NUMBER_RUN, PRICE_PATTERNS};
use crate::result::{ExtractedValues, Field, SelectorSet};
use crate::text::normalize;

/// Read all three fields through `selectors`, using default options.
///
/// # Example
///
/// ```rust
/// use price_anchor::{extractor, ParsedDocument, SelectorSet};
///
/// let doc = ParsedDocument::parse(r#"<span class="price">Now $45.00 (was $60.00)</span>"#)?;
/// let selectors = SelectorSet {
///     price_path: "/html/body/span".parse().ok(),
///     ..SelectorSet::default()
/// };
/// let values = extractor::extract(&doc, &selectors);
/// assert_eq!(values.price, Some(45.0));
/// assert!(values.title.is_none());
/// # Ok::<(), price_anchor::Error>(())
/// ```
#[must_use]
pub fn extract(doc: &ParsedDocument, selectors: &SelectorSet) -> ExtractedValues {
    extract_with_options(doc, selectors, &Options::default())
}

/// Read all three fields through `selectors`.
#[must_use]
pub fn extract_with_options(doc: &ParsedDocument, selectors: &SelectorSet, options: &Options) -> ExtractedValues {
    ExtractedValues {
        title: resolve(doc, selectors, Field::Title).map(|node| read_title(&node)),
        price: resolve(doc, selectors, Field::Price)
            .and_then(|node| read_price(&normalize(&dom::text_content(&node)), options)),
        currency: resolve(doc, selectors, Field::Currency)
            .and_then(|node| read_currency(&normalize(&dom::text_content(&node)))),
    }
}

fn resolve<'a>(doc: &'a ParsedDocument, selectors: &SelectorSet, field: Field) -> Option<NodeRef<'a>> {
    let path = selectors.get(field)?;
    let node = doc.resolve(path);
    if node.is_none() {
        log::debug!("{field} path {path} does not resolve in this document");
    }
    node
}

/// Space-joined descendant text, normalized. Elements without any text node
/// fall back to their normalized markup.
#[must_use]
pub fn read_title(node: &NodeRef<'_>) -> String {
    match dom::joined_text(node) {
        Some(text) => normalize(&text),
        None => normalize(&dom::outer_html(node)),
    }
}

/// Read a price from normalized element text.
///
/// The price patterns are tried in priority order (glyph + number, then
/// dot-decimal, then comma-decimal); for each, only its first match is
/// considered and accepted if it parses into the configured range. When no
/// pattern yields a price, the first in-range digit run is taken.
///
/// ```rust
/// use price_anchor::{extractor::read_price, Options};
///
/// let options = Options::default();
/// assert_eq!(read_price("Now $45.00 (was $60.00)", &options), Some(45.0));
/// assert_eq!(read_price("12,50 EUR", &options), Some(12.5));
/// assert_eq!(read_price("Out of stock", &options), None);
/// ```
#[must_use]
pub fn read_price(text: &str, options: &Options) -> Option<f64> {
    let from_patterns = PRICE_PATTERNS.iter().find_map(|pattern| {
        let captured = pattern.captures(text)?.name("num")?.as_str().replace(',', ".");
        captured.parse::<f64>().ok().filter(|v| options.price_in_range(*v))
    });
    if from_patterns.is_some() {
        return from_patterns;
    }

    NUMBER_RUN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .find(|v| options.price_in_range(*v))
}

/// Read a currency from normalized element text: the first known glyph or
/// code if present, else the whole text. Empty text yields `None`.
#[must_use]
pub fn read_currency(text: &str) -> Option<String> {
    if let Some(token) = CURRENCY_TOKEN.find(text) {
        return Some(token.as_str().to_string());
    }

    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
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

    fn selectors(title: Option<&str>, price: Option<&str>, currency: Option<&str>) -> SelectorSet {
        SelectorSet {
            title_path: title.and_then(|p| p.parse().ok()),
            price_path: price.and_then(|p| p.parse().ok()),
            currency_path: currency.and_then(|p| p.parse().ok()),
        }
    }

    #[test]
    fn test_price_pattern_priority() {
        let opts = Options::default();

        assert_eq!(read_price("Now $45.00 (was $60.00)", &opts), Some(45.0));
        assert_eq!(read_price("Was 60.00, now only £45", &opts), Some(45.0));
        assert_eq!(read_price("Price 19.99 (3 left)", &opts), Some(19.99));
        assert_eq!(read_price("Preis 12,50", &opts), Some(12.5));
    }

    #[test]
    fn test_price_symbol_stops_at_thousands_separator() {
        // The glyph pattern does not span thousands separators
        assert_eq!(read_price("$1,234.50", &Options::default()), Some(1.0));
    }

    #[test]
    fn test_price_out_of_range_moves_to_next_pattern() {
        let opts = Options::default();

        assert_eq!(read_price("$0 today, 9.99 tomorrow", &opts), Some(9.99));
        assert_eq!(read_price("$2000000 or 15.5", &opts), Some(15.5));
    }

    #[test]
    fn test_price_digit_run_fallback() {
        let opts = Options::default();

        assert_eq!(read_price("Only 0 then 45 left", &opts), Some(45.0));
        assert_eq!(read_price("Sold out", &opts), None);
        assert_eq!(read_price("", &opts), None);
    }

    #[test]
    fn test_price_respects_custom_range() {
        let opts = Options {
            max_price: 50.0,
            ..Options::default()
        };
        assert_eq!(read_price("$60.00", &opts), None);
    }

    #[test]
    fn test_currency_token_or_full_text() {
        assert_eq!(read_currency("$19.99").as_deref(), Some("$"));
        assert_eq!(read_currency("19.99 usd").as_deref(), Some("usd"));
        assert_eq!(read_currency("CHF").as_deref(), Some("CHF"));
        assert_eq!(read_currency("").as_deref(), None);
    }

    #[test]
    fn test_title_joins_text_nodes() {
        let doc = parse("<h1>  Wireless <em>Silent</em>\n Mouse </h1><img src=\"a.png\">");

        assert_eq!(read_title(&doc.select("h1")[0]), "Wireless Silent Mouse");
        assert!(read_title(&doc.select("img")[0]).starts_with("<img"));
    }

    #[test]
    fn test_extract_all_fields() {
        let doc = parse(r#"<h1>Wireless Mouse</h1><span class="price">$19.99</span>"#);
        let set = selectors(Some("/html/body/h1"), Some("/html/body/span"), Some("/html/body/span"));

        let values = extract(&doc, &set);
        assert_eq!(values.title.as_deref(), Some("Wireless Mouse"));
        assert_eq!(values.price, Some(19.99));
        assert_eq!(values.currency.as_deref(), Some("$"));
    }

    #[test]
    fn test_fields_resolve_independently() {
        let doc = parse(r#"<h1>Wireless Mouse</h1><span class="price">$19.99</span>"#);
        let set = selectors(Some("/html/body/h2"), Some("/html/body/span"), None);

        let values = extract(&doc, &set);
        assert!(values.title.is_none());
        assert_eq!(values.price, Some(19.99));
        assert!(values.currency.is_none());
    }
}
