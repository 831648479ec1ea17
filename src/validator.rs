//! Consistency Validator
//!
//! Compares values re-read through a selector set with the values asserted by
//! the extraction service. A field with a value missing on either side is
//! reported as not matching; comparison itself never fails.

use crate::dom::ParsedDocument;
use crate::extractor;
use crate::options::Options;
use crate::result::{ComparisonResult, ExtractedValues, FieldMatches, PriceValue, SelectorSet, SourceValues};
use crate::text::{canonical_currency, fold};

/// Extract through `selectors` and compare against `source`, using default
/// options.
#[must_use]
pub fn compare(doc: &ParsedDocument, selectors: &SelectorSet, source: &SourceValues) -> ComparisonResult {
    compare_with_options(doc, selectors, source, &Options::default())
}

/// Extract through `selectors` and compare against `source`.
#[must_use]
pub fn compare_with_options(
    doc: &ParsedDocument,
    selectors: &SelectorSet,
    source: &SourceValues,
    options: &Options,
) -> ComparisonResult {
    let extracted = extractor::extract_with_options(doc, selectors, options);
    judge(extracted, source, options)
}

/// Compare values that were already extracted and build the result.
pub(crate) fn judge(extracted: ExtractedValues, source: &SourceValues, options: &Options) -> ComparisonResult {
    let matches = compare_values(&extracted, source, options);

    if matches.all() {
        log::info!("Selector comparison: all fields match");
    } else {
        log::warn!(
            "Selector comparison mismatch: title={} price={} currency={}",
            matches.title,
            matches.price,
            matches.currency
        );
    }

    ComparisonResult::new(extracted, source.clone(), matches)
}

/// Per-field comparison of already extracted values.
#[must_use]
pub fn compare_values(extracted: &ExtractedValues, source: &SourceValues, options: &Options) -> FieldMatches {
    FieldMatches {
        title: titles_match(source.title.as_deref(), extracted.title.as_deref()),
        price: prices_match(
            source.price.as_ref().and_then(PriceValue::usable),
            extracted.price,
            options.price_tolerance,
        ),
        currency: currencies_match(source.currency.as_deref(), extracted.currency.as_deref()),
    }
}

/// Case-insensitive equality or containment in either direction, after
/// whitespace normalization. Empty titles never match.
#[must_use]
pub fn titles_match(source: Option<&str>, extracted: Option<&str>) -> bool {
    let (Some(source), Some(extracted)) = (source.map(fold), extracted.map(fold)) else {
        return false;
    };
    if source.is_empty() || extracted.is_empty() {
        return false;
    }

    source == extracted || source.contains(&extracted) || extracted.contains(&source)
}

/// Both prices present and closer than `tolerance`.
#[must_use]
pub fn prices_match(source: Option<f64>, extracted: Option<f64>, tolerance: f64) -> bool {
    match (source, extracted) {
        (Some(a), Some(b)) => (a - b).abs() < tolerance,
        _ => false,
    }
}

/// Both currencies present and equal once mapped to their ISO code (for
/// known currencies) and uppercased.
#[must_use]
pub fn currencies_match(source: Option<&str>, extracted: Option<&str>) -> bool {
    match (source.and_then(currency_key), extracted.and_then(currency_key)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn currency_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(canonical_currency(trimmed).map_or_else(|| trimmed.to_uppercase(), str::to_string))
}
