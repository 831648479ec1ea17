//! Input and output records.
//!
//! Everything here is a plain serde record so an outer layer can move it over
//! JSON: the source values asserted by the extraction service, the selector
//! set produced by synthesis, the values re-read through it and the
//! comparison between the two.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::LocationPath;
use crate::text::coerce_number;

/// One of the three located fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Price,
    Currency,
}

impl Field {
    /// All fields in synthesis order.
    pub const ALL: [Field; 3] = [Field::Title, Field::Price, Field::Currency];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Title => "title",
            Field::Price => "price",
            Field::Currency => "currency",
        })
    }
}

/// A price as asserted by the extraction service: either a number or the
/// text it was displayed as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    /// Numeric value, with `0.0` meaning "no usable number".
    ///
    /// Numbers pass through unchanged; text goes through
    /// [`coerce_number`](crate::text::coerce_number).
    #[must_use]
    pub fn coerce(&self) -> f64 {
        match self {
            PriceValue::Number(n) => *n,
            PriceValue::Text(t) => coerce_number(t),
        }
    }

    /// Numeric value, or `None` when no usable number can be read.
    #[must_use]
    pub fn usable(&self) -> Option<f64> {
        let value = self.coerce();
        (value.is_finite() && value != 0.0).then_some(value)
    }
}

impl From<f64> for PriceValue {
    fn from(value: f64) -> Self {
        PriceValue::Number(value)
    }
}

impl From<&str> for PriceValue {
    fn from(value: &str) -> Self {
        PriceValue::Text(value.to_string())
    }
}

impl From<String> for PriceValue {
    fn from(value: String) -> Self {
        PriceValue::Text(value)
    }
}

/// Field values asserted by the external extraction service.
///
/// # Example
///
/// ```rust
/// use price_anchor::SourceValues;
///
/// let source = SourceValues::default()
///     .with_title("Wireless Mouse")
///     .with_price(19.99)
///     .with_currency("USD");
/// assert_eq!(source.title.as_deref(), Some("Wireless Mouse"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceValues {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "price_value")]
    pub price: Option<PriceValue>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl SourceValues {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: impl Into<PriceValue>) -> Self {
        self.price = Some(price.into());
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// Location paths for the three fields, produced once per synthesis.
///
/// Callers persist this and reuse it against later fetches of the same page
/// template. Nothing here expires on its own; staleness shows up as a failed
/// comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    #[serde(default, alias = "title_xpath")]
    pub title_path: Option<LocationPath>,
    #[serde(default, alias = "price_xpath")]
    pub price_path: Option<LocationPath>,
    #[serde(default, alias = "currency_xpath")]
    pub currency_path: Option<LocationPath>,
}

impl SelectorSet {
    /// Path for one field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&LocationPath> {
        match field {
            Field::Title => self.title_path.as_ref(),
            Field::Price => self.price_path.as_ref(),
            Field::Currency => self.currency_path.as_ref(),
        }
    }

    /// Whether every field was located.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_some())
    }

    /// Serialize to JSON for storage.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a stored selector set. Accepts both `*_path` and legacy `*_xpath`
    /// keys; malformed paths are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Values re-read from a document through a selector set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedValues {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
}

/// Per-field match flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMatches {
    pub title: bool,
    pub price: bool,
    pub currency: bool,
}

impl FieldMatches {
    /// Match flag for one field.
    #[must_use]
    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::Title => self.title,
            Field::Price => self.price,
            Field::Currency => self.currency,
        }
    }

    /// Whether every field matched.
    #[must_use]
    pub fn all(&self) -> bool {
        self.title && self.price && self.currency
    }
}

/// Outcome of comparing re-extracted values against source values.
///
/// Built only by the consistency validator and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    extracted_values: ExtractedValues,
    source_values: SourceValues,
    per_field_match: FieldMatches,
    all_match: bool,
}

impl ComparisonResult {
    pub(crate) fn new(extracted_values: ExtractedValues, source_values: SourceValues, per_field_match: FieldMatches) -> Self {
        Self {
            extracted_values,
            source_values,
            all_match: per_field_match.all(),
            per_field_match,
        }
    }

    /// Values read through the selector set.
    #[must_use]
    pub fn extracted(&self) -> &ExtractedValues {
        &self.extracted_values
    }

    /// Values the extraction was compared against.
    #[must_use]
    pub fn source(&self) -> &SourceValues {
        &self.source_values
    }

    /// Per-field match flags.
    #[must_use]
    pub fn matches(&self) -> FieldMatches {
        self.per_field_match
    }

    /// Whether every field matched.
    #[must_use]
    pub fn all_match(&self) -> bool {
        self.all_match
    }
}

/// A re-extracted value together with the path that produced it.
///
/// When the field was not located, `path` is `None` and `value` carries the
/// source value instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReading<T> {
    pub value: Option<T>,
    pub path: Option<LocationPath>,
}

/// Result of synthesizing selectors for a page and checking them against the
/// same page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub title: FieldReading<String>,
    pub price: FieldReading<f64>,
    pub currency: FieldReading<String>,
    pub selectors: SelectorSet,
    /// Present only when every field was located.
    pub comparison: Option<ComparisonResult>,
}
