//! # price-anchor
//!
//! Structural selector synthesis and cross-validation for product pages.
//!
//! Given a rendered HTML page and the title, price and currency an upstream
//! extraction service reported for it, this library finds the elements that
//! display those values and records their location paths. The resulting
//! [`SelectorSet`] can be stored and applied to later fetches of the same page
//! template to re-read the values cheaply, and to flag drift when they no
//! longer agree with what the service reports.
//!
//! ## Quick Start
//!
//! ```rust
//! use price_anchor::{compare, synthesize, SourceValues};
//!
//! let html = r#"<html><body>
//!   <h1>Wireless Mouse</h1>
//!   <span class="price">$19.99</span>
//! </body></html>"#;
//!
//! let source = SourceValues::default()
//!     .with_title("Wireless Mouse")
//!     .with_price(19.99)
//!     .with_currency("USD");
//!
//! let selectors = synthesize(html, &source)?;
//! assert_eq!(selectors.title_path.as_ref().map(ToString::to_string).as_deref(), Some("/html/body/h1"));
//!
//! let result = compare(html, &selectors, &source)?;
//! assert!(result.all_match());
//! # Ok::<(), price_anchor::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Synthesis**: tiered heuristics per field (headings, class/id hints,
//!   document-wide text scans)
//! - **Extraction**: re-read values through stored paths, field by field
//! - **Validation**: per-field comparison with tolerance and currency aliases
//! - **Byte input**: charset detection for pages fetched as raw bytes
//!
//! Logging goes through the [`log`] facade; install any logger to see which
//! heuristic tier located each field.

mod error;
mod options;
mod patterns;
mod pipeline;
mod result;

/// Parsed documents, element/path mapping and node text accessors.
pub mod dom;

/// Location path type and its string grammar.
pub mod path;

/// Whitespace normalization and numeric coercion.
pub mod text;

/// Selector rules and document-order queries.
pub mod selector;

/// Title, price and currency locators.
pub mod locator;

/// Value extraction through a selector set.
pub mod extractor;

/// Comparison of extracted values against source values.
pub mod validator;

/// Character encoding detection for byte input.
pub mod encoding;

// Public API - re-exports
pub use dom::ParsedDocument;
pub use error::{Error, Result};
pub use options::Options;
pub use path::{LocationPath, Step};
pub use result::{
    AnalysisReport, ComparisonResult, ExtractedValues, Field, FieldMatches, FieldReading, PriceValue, SelectorSet,
    SourceValues,
};

/// Parses an HTML string into a document.
///
/// # Example
///
/// ```rust
/// let doc = price_anchor::parse("<p>hello</p>")?;
/// assert!(doc.select("p").len() == 1);
/// # Ok::<(), price_anchor::Error>(())
/// ```
pub fn parse(html: &str) -> Result<ParsedDocument> {
    ParsedDocument::parse(html)
}

/// Parses HTML bytes with automatic encoding detection.
///
/// The encoding is taken from a byte order mark, then from
/// `<meta charset="...">` or `<meta http-equiv="Content-Type" ...>` in the
/// first 1024 bytes, and defaults to UTF-8. Malformed sequences are replaced
/// with U+FFFD.
///
/// # Example
///
/// ```rust
/// use price_anchor::{extractor, parse_bytes, SelectorSet};
///
/// let html = b"<meta charset=\"ISO-8859-1\"><span class=\"price\">\xA349.00</span>";
/// let doc = parse_bytes(html)?;
/// let selectors = SelectorSet {
///     currency_path: "/html/body/span".parse().ok(),
///     ..SelectorSet::default()
/// };
/// assert_eq!(extractor::extract(&doc, &selectors).currency.as_deref(), Some("£"));
/// # Ok::<(), price_anchor::Error>(())
/// ```
pub fn parse_bytes(html: &[u8]) -> Result<ParsedDocument> {
    let decoded = encoding::decode_html(html)?;
    ParsedDocument::parse(&decoded)
}

/// Synthesizes location paths for the source values using default options.
///
/// Fields absent from `source`, or not found on the page, get no path.
pub fn synthesize(html: &str, source: &SourceValues) -> Result<SelectorSet> {
    synthesize_with_options(html, source, &Options::default())
}

/// Synthesizes location paths for the source values.
///
/// # Example
///
/// ```rust
/// use price_anchor::{synthesize_with_options, Options, SourceValues};
///
/// let html = r#"<div class="product"><b>Desk Lamp</b> <i>24.00 EUR</i></div>"#;
/// let options = Options {
///     scan_budget: Some(1_000),
///     ..Options::default()
/// };
/// let source = SourceValues::default().with_price("24,00").with_currency("EUR");
///
/// let selectors = synthesize_with_options(html, &source, &options)?;
/// assert_eq!(selectors.price_path.map(|p| p.to_string()).as_deref(), Some("/html/body/div/i"));
/// # Ok::<(), price_anchor::Error>(())
/// ```
pub fn synthesize_with_options(html: &str, source: &SourceValues, options: &Options) -> Result<SelectorSet> {
    let doc = ParsedDocument::parse(html)?;
    Ok(pipeline::synthesize_selectors(&doc, source, options))
}

/// Re-reads field values from `html` through a stored selector set.
pub fn extract_values(html: &str, selectors: &SelectorSet) -> Result<ExtractedValues> {
    let doc = ParsedDocument::parse(html)?;
    Ok(extractor::extract(&doc, selectors))
}

/// Re-reads field values and compares them with `source`, using default
/// options.
pub fn compare(html: &str, selectors: &SelectorSet, source: &SourceValues) -> Result<ComparisonResult> {
    compare_with_options(html, selectors, source, &Options::default())
}

/// Re-reads field values and compares them with `source`.
pub fn compare_with_options(
    html: &str,
    selectors: &SelectorSet,
    source: &SourceValues,
    options: &Options,
) -> Result<ComparisonResult> {
    let doc = ParsedDocument::parse(html)?;
    Ok(validator::compare_with_options(&doc, selectors, source, options))
}

/// Synthesizes selectors for a page and checks them against the same page,
/// using default options.
///
/// The comparison is only run when every field was located; otherwise
/// [`AnalysisReport::comparison`] is `None`.
///
/// # Example
///
/// ```rust
/// use price_anchor::{analyze, SourceValues};
///
/// let html = r#"<h1>Wireless Mouse</h1><span class="price">$19.99</span>"#;
/// let source = SourceValues::default()
///     .with_title("Wireless Mouse")
///     .with_price(19.99)
///     .with_currency("USD");
///
/// let report = analyze(html, &source)?;
/// assert_eq!(report.price.value, Some(19.99));
/// assert!(report.comparison.is_some_and(|c| c.all_match()));
/// # Ok::<(), price_anchor::Error>(())
/// ```
pub fn analyze(html: &str, source: &SourceValues) -> Result<AnalysisReport> {
    analyze_with_options(html, source, &Options::default())
}

/// Synthesizes selectors for a page and checks them against the same page.
pub fn analyze_with_options(html: &str, source: &SourceValues, options: &Options) -> Result<AnalysisReport> {
    let doc = ParsedDocument::parse(html)?;
    Ok(pipeline::analyze_document(&doc, source, options))
}
