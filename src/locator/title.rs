//! Title Locator
//!
//! Titles without a significant word (three or more characters by default)
//! are not searched for.
//!
//! Tiers, first success wins:
//! 1. Headings `h1`..`h4` (all `h1` first, then `h2`, ...), matched by
//!    containment or by significant-word overlap.
//! 2. Elements whose class, then id, mentions `product`, `title` or `name`,
//!    matched by containment.
//! 3. Any rendered element whose own text contains the first characters of
//!    the title.

use std::collections::HashSet;

use dom_query::NodeRef;

use super::{first_hit, Strategy};
use crate::dom::{self, ParsedDocument};
use crate::options::Options;
use crate::path::LocationPath;
use crate::patterns::HEADING_TAGS;
use crate::result::Field;
use crate::selector::{self, TITLE_HINTED};
use crate::text::{fold, significant_words};

/// A title prepared for matching against element text.
#[derive(Debug, Clone)]
pub struct TitleTarget {
    folded: String,
    words: Vec<String>,
    prefix: String,
}

impl TitleTarget {
    /// Prepare `title` for matching. Returns `None` when the title has no
    /// significant word (`options.min_word_len` characters or more), which
    /// covers empty and whitespace-only titles.
    #[must_use]
    pub fn new(title: &str, options: &Options) -> Option<Self> {
        let folded = fold(title);
        let words: Vec<String> = significant_words(&folded, options.min_word_len)
            .into_iter()
            .map(str::to_string)
            .collect();
        if words.is_empty() {
            return None;
        }
        let prefix = folded.chars().take(options.title_prefix_chars).collect();

        Some(Self { folded, words, prefix })
    }

    /// Equality or containment in either direction against folded text.
    /// Empty text never matches.
    #[must_use]
    pub fn contains_match(&self, text: &str) -> bool {
        !text.is_empty() && (self.folded.contains(text) || text.contains(&self.folded))
    }

    /// Whether a multi-word title shares at least `min_shared` significant
    /// words with the folded text.
    #[must_use]
    pub fn overlaps(&self, text: &str, min_len: usize, min_shared: usize) -> bool {
        if self.words.len() < min_shared {
            return false;
        }

        let title_words: HashSet<&str> = self.words.iter().map(String::as_str).collect();
        let text_words: HashSet<&str> = significant_words(text, min_len).into_iter().collect();
        title_words.intersection(&text_words).count() >= min_shared
    }
}

/// Folded, space-joined descendant text of an element.
fn element_text(node: &NodeRef<'_>) -> String {
    dom::joined_text(node).map(|t| fold(&t)).unwrap_or_default()
}

/// Tier 1: heading elements.
pub struct HeadingTier<'a> {
    target: &'a TitleTarget,
    options: &'a Options,
}

impl<'a> HeadingTier<'a> {
    #[must_use]
    pub fn new(target: &'a TitleTarget, options: &'a Options) -> Self {
        Self { target, options }
    }
}

impl Strategy for HeadingTier<'_> {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn locate(&self, doc: &ParsedDocument) -> Option<LocationPath> {
        HEADING_TAGS.iter().find_map(|heading| {
            let hit = selector::query(&doc.select(heading), |node| {
                let text = element_text(node);
                self.target.contains_match(&text)
                    || self
                        .target
                        .overlaps(&text, self.options.min_word_len, self.options.min_shared_words)
            })?;
            doc.path_of(&hit)
        })
    }
}

/// Tier 2: elements with product/title/name hints in class or id.
pub struct HintedTier<'a> {
    target: &'a TitleTarget,
}

impl<'a> HintedTier<'a> {
    #[must_use]
    pub fn new(target: &'a TitleTarget) -> Self {
        Self { target }
    }
}

impl Strategy for HintedTier<'_> {
    fn name(&self) -> &'static str {
        "hinted"
    }

    fn locate(&self, doc: &ParsedDocument) -> Option<LocationPath> {
        let hit = selector::query_hinted(doc, TITLE_HINTED, |node| {
            self.target.contains_match(&element_text(node))
        })?;
        doc.path_of(&hit)
    }
}

/// Tier 3: document-wide scan for the title prefix in element own text.
pub struct TextFallbackTier<'a> {
    target: &'a TitleTarget,
    budget: Option<usize>,
}

impl<'a> TextFallbackTier<'a> {
    #[must_use]
    pub fn new(target: &'a TitleTarget, budget: Option<usize>) -> Self {
        Self { target, budget }
    }
}

impl Strategy for TextFallbackTier<'_> {
    fn name(&self) -> &'static str {
        "text-fallback"
    }

    fn locate(&self, doc: &ParsedDocument) -> Option<LocationPath> {
        let elements = selector::scan(doc, self.budget);
        let hit = selector::query(&elements, |node| {
            fold(&dom::own_text(node)).contains(&self.target.prefix)
        })?;
        doc.path_of(&hit)
    }
}

/// Locate the element displaying `title`, using default options.
///
/// # Example
///
/// ```rust
/// use price_anchor::{locator, ParsedDocument};
///
/// let doc = ParsedDocument::parse("<h1>Wireless Mouse</h1>")?;
/// let path = locator::locate_title(&doc, "Wireless Mouse");
/// assert_eq!(path.map(|p| p.to_string()).as_deref(), Some("/html/body/h1"));
/// assert!(locator::locate_title(&doc, "   ").is_none());
/// # Ok::<(), price_anchor::Error>(())
/// ```
#[must_use]
pub fn locate_title(doc: &ParsedDocument, title: &str) -> Option<LocationPath> {
    locate_title_with_options(doc, title, &Options::default())
}

/// Locate the element displaying `title`.
#[must_use]
pub fn locate_title_with_options(doc: &ParsedDocument, title: &str, options: &Options) -> Option<LocationPath> {
    let target = TitleTarget::new(title, options)?;

    let heading = HeadingTier::new(&target, options);
    let hinted = HintedTier::new(&target);
    let fallback = TextFallbackTier::new(&target, options.scan_budget);
    first_hit(Field::Title, doc, &[&heading, &hinted, &fallback])
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

    fn target(title: &str) -> TitleTarget {
        match TitleTarget::new(title, &Options::default()) {
            Some(target) => target,
            None => panic!("title {title:?} should be usable"),
        }
    }

    fn path_string(path: Option<LocationPath>) -> Option<String> {
        path.map(|p| p.to_string())
    }

    #[test]
    fn test_empty_titles_are_rejected() {
        let doc = parse("<h1>Anything</h1>");

        assert!(locate_title(&doc, "").is_none());
        assert!(locate_title(&doc, "   ").is_none());
        assert!(locate_title(&doc, "\n\t").is_none());
    }

    #[test]
    fn test_titles_without_significant_words_are_rejected() {
        let doc = parse("<h1>Smart TV Stand</h1><p class=\"product-name\">TV</p>");

        assert!(TitleTarget::new("TV", &Options::default()).is_none());
        assert!(TitleTarget::new("a b 42", &Options::default()).is_none());
        assert!(locate_title(&doc, "TV").is_none());

        // One significant word is enough
        let path = locate_title(&doc, "Smart TV");
        assert_eq!(path_string(path).as_deref(), Some("/html/body/h1"));
    }

    #[test]
    fn test_containment_in_both_directions() {
        let t = target("  Wireless   Mouse ");

        assert!(t.contains_match("wireless mouse"));
        assert!(t.contains_match("logitech wireless mouse m185"));
        assert!(t.contains_match("mouse"));
        assert!(!t.contains_match("keyboard"));
        assert!(!t.contains_match(""));
    }

    #[test]
    fn test_word_overlap_needs_three_shared_words() {
        let t = target("Logitech MX Master 3S Wireless Performance Mouse");
        let opts = Options::default();

        assert!(t.overlaps("mx master 3s performance mouse by logitech", opts.min_word_len, 3));
        assert!(!t.overlaps("logitech mouse", opts.min_word_len, 3));

        // Fewer than three significant words in the title disables overlap
        let short = target("Wireless Mouse");
        assert!(!short.overlaps("wireless mouse pad", opts.min_word_len, 3));
    }

    #[test]
    fn test_heading_tier_prefers_h1_over_earlier_h2() {
        let doc = parse("<h2>Wireless Mouse accessories</h2><h1>Wireless Mouse</h1>");
        let t = target("Wireless Mouse");
        let opts = Options::default();

        let path = HeadingTier::new(&t, &opts).locate(&doc);
        assert_eq!(path_string(path).as_deref(), Some("/html/body/h1"));
    }

    #[test]
    fn test_heading_tier_matches_by_word_overlap() {
        let doc = parse("<h1>Ergonomic Vertical Mouse - Wireless, Rechargeable</h1>");
        let t = target("Wireless Ergonomic Vertical Mouse");
        let opts = Options::default();

        let path = HeadingTier::new(&t, &opts).locate(&doc);
        assert_eq!(path_string(path).as_deref(), Some("/html/body/h1"));
    }

    #[test]
    fn test_heading_tier_skips_empty_headings() {
        let doc = parse("<h1></h1><h1>Wireless Mouse</h1>");
        let t = target("Wireless Mouse");
        let opts = Options::default();

        let path = HeadingTier::new(&t, &opts).locate(&doc);
        assert_eq!(path_string(path).as_deref(), Some("/html/body/h1[2]"));
    }

    #[test]
    fn test_hinted_tier_class_then_id() {
        let doc = parse(
            r#"
            <div id="product-name">Wireless Mouse</div>
            <span class="item-title">Wireless Mouse</span>
        "#,
        );
        let t = target("Wireless Mouse");

        let path = HintedTier::new(&t).locate(&doc);
        assert_eq!(path_string(path).as_deref(), Some("/html/body/span"));
    }

    #[test]
    fn test_fallback_uses_prefix_of_long_titles() {
        let doc = parse(
            r#"<div><p>Ultra Quiet Wireless Mouse With USB Receiver (Black)</p></div>"#,
        );
        let t = target("Ultra Quiet Wireless Mouse With USB Receiver, 2.4G, Black");

        let path = TextFallbackTier::new(&t, None).locate(&doc);
        assert_eq!(path_string(path).as_deref(), Some("/html/body/div/p"));
    }

    #[test]
    fn test_fallback_ignores_script_text() {
        let doc = parse(r#"<script>var t = "wireless mouse";</script><p>Wireless Mouse</p>"#);
        let t = target("Wireless Mouse");

        let path = TextFallbackTier::new(&t, None).locate(&doc);
        assert_eq!(path_string(path).as_deref(), Some("/html/body/p"));
    }

    #[test]
    fn test_locate_title_falls_through_tiers() {
        let doc = parse(r#"<div class="layout"><em>Deluxe Wireless Mouse</em></div>"#);

        let path = locate_title(&doc, "Deluxe Wireless Mouse");
        assert_eq!(path_string(path).as_deref(), Some("/html/body/div/em"));
    }

    #[test]
    fn test_locate_title_miss() {
        let doc = parse("<h1>Keyboard</h1><p>Nothing here</p>");
        assert!(locate_title(&doc, "Wireless Mouse").is_none());
    }
}
