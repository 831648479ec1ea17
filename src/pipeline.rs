//! Selector synthesis and the analyze flow.
//!
//! Synthesis runs the three locators in a fixed order: title, price, then
//! currency, with the price path handed to the currency locator so it can
//! look next to the price first. A missing source field or a locator miss
//! leaves that path empty; synthesis itself cannot fail once the document
//! is parsed.

use crate::dom::ParsedDocument;
use crate::extractor;
use crate::locator;
use crate::options::Options;
use crate::result::{AnalysisReport, Field, FieldReading, PriceValue, SelectorSet, SourceValues};
use crate::validator;

/// Locate every field of `source` in `doc`.
pub(crate) fn synthesize_selectors(doc: &ParsedDocument, source: &SourceValues, options: &Options) -> SelectorSet {
    let title_path = source
        .title
        .as_deref()
        .and_then(|title| locator::locate_title_with_options(doc, title, options));

    let price_path = source
        .price
        .as_ref()
        .and_then(|price| locator::locate_price_with_options(doc, price, options));

    let currency_path = source
        .currency
        .as_deref()
        .and_then(|currency| locator::locate_currency_with_options(doc, currency, price_path.as_ref(), options));

    let selectors = SelectorSet {
        title_path,
        price_path,
        currency_path,
    };

    let located = Field::ALL.iter().filter(|field| selectors.get(**field).is_some()).count();
    log::info!("Synthesized selectors: {located}/{} fields located", Field::ALL.len());

    selectors
}

/// Synthesize selectors, read the values back through them and, when every
/// field was located, compare against `source`.
///
/// A field that could not be read from the page reports the source value
/// with no path.
pub(crate) fn analyze_document(doc: &ParsedDocument, source: &SourceValues, options: &Options) -> AnalysisReport {
    let selectors = synthesize_selectors(doc, source, options);
    let extracted = extractor::extract_with_options(doc, &selectors, options);

    let comparison = if selectors.is_complete() {
        Some(validator::judge(extracted.clone(), source, options))
    } else {
        let missing: Vec<String> = Field::ALL
            .iter()
            .filter(|field| selectors.get(**field).is_none())
            .map(ToString::to_string)
            .collect();
        log::warn!("Skipping comparison, not located: {}", missing.join(", "));
        None
    };

    AnalysisReport {
        title: FieldReading {
            value: extracted.title.or_else(|| source.title.clone()),
            path: selectors.title_path.clone(),
        },
        price: FieldReading {
            value: extracted.price.or_else(|| source.price.as_ref().and_then(PriceValue::usable)),
            path: selectors.price_path.clone(),
        },
        currency: FieldReading {
            value: extracted.currency.or_else(|| source.currency.clone()),
            path: selectors.currency_path.clone(),
        },
        selectors,
        comparison,
    }
}
