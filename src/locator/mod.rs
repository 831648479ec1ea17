//! Field Locators
//!
//! Each locator turns a known field value into the [`LocationPath`] of the
//! element that displays it. A locator is an ordered list of heuristic tiers;
//! the first tier that finds an element wins. Tiers implement [`Strategy`] so
//! they can be run, reordered and tested on their own.
//!
//! A miss is an ordinary outcome and is reported as `None`.

use crate::dom::ParsedDocument;
use crate::path::LocationPath;
use crate::result::Field;

pub mod currency;
pub mod price;
pub mod title;

pub use currency::{locate_currency, locate_currency_with_options};
pub use price::{locate_price, locate_price_with_options};
pub use title::{locate_title, locate_title_with_options};

/// One heuristic tier of a field locator.
pub trait Strategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Path of the element this tier picks, if any.
    fn locate(&self, doc: &ParsedDocument) -> Option<LocationPath>;
}

/// Run `tiers` in order and return the first path found.
#[must_use]
pub fn first_hit(field: Field, doc: &ParsedDocument, tiers: &[&dyn Strategy]) -> Option<LocationPath> {
    for tier in tiers {
        if let Some(path) = tier.locate(doc) {
            log::debug!("{field} located by {} tier at {path}", tier.name());
            return Some(path);
        }
        log::debug!("{field} not found by {} tier", tier.name());
    }
    None
}
