//! Configuration options for selector synthesis and validation.
//!
//! The `Options` struct holds the thresholds used by the field locators, the
//! value extractor and the consistency validator. The defaults reproduce the
//! behaviour expected by callers that persist selector sets, so changing them
//! can make previously stored selectors compare differently.

/// Configuration options for locating, extracting and comparing fields.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use price_anchor::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Bound the document-wide fallback scans more tightly
/// let options = Options {
///     scan_budget: Some(5_000),
///     ..Options::default()
/// };
/// assert_eq!(options.title_prefix_chars, 30);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of elements visited by a document-wide fallback tier.
    ///
    /// Fallback tiers scan every element of the document and dominate the cost
    /// on large pages. When the budget is exhausted the tier reports a miss.
    /// `None` disables the bound.
    ///
    /// Default: `Some(50_000)`
    pub scan_budget: Option<usize>,

    /// Number of characters of the normalized title used by the title
    /// fallback tier.
    ///
    /// Default: `30`
    pub title_prefix_chars: usize,

    /// Number of significant words a heading must share with a multi-word
    /// title to count as a match.
    ///
    /// Default: `3`
    pub min_shared_words: usize,

    /// Minimum character count for a word to be significant.
    ///
    /// Default: `3`
    pub min_word_len: usize,

    /// Smallest price accepted by the value extractor.
    ///
    /// Default: `0.01`
    pub min_price: f64,

    /// Largest price accepted by the value extractor.
    ///
    /// Default: `1_000_000.0`
    pub max_price: f64,

    /// Exclusive upper bound on the absolute difference between two prices
    /// that still compare equal.
    ///
    /// Default: `0.01`
    pub price_tolerance: f64,
}

impl Options {
    /// Whether `value` lies inside the accepted price range (inclusive).
    #[must_use]
    pub fn price_in_range(&self, value: f64) -> bool {
        (self.min_price..=self.max_price).contains(&value)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            scan_budget: Some(50_000),
            title_prefix_chars: 30,
            min_shared_words: 3,
            min_word_len: 3,
            min_price: 0.01,
            max_price: 1_000_000.0,
            price_tolerance: 0.01,
        }
    }
}
