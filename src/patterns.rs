//! Compiled regex patterns and lookup tables for field location and extraction.
//!
//! All patterns are compiled once at first use via `LazyLock` and shared by
//! every call. Tables are plain constants.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Price Patterns
// =============================================================================

/// Currency glyph followed by a number, e.g. `$ 45.00`.
pub static PRICE_WITH_SYMBOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[$€£¥₹]\s*(?P<num>\d+\.?\d*)").expect("PRICE_WITH_SYMBOL regex")
});

/// Number with one or two decimal digits after a period.
pub static PRICE_DOT_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<num>\d+\.\d{1,2})\b").expect("PRICE_DOT_DECIMAL regex")
});

/// Number with one or two decimal digits after a comma.
pub static PRICE_COMMA_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<num>\d+,\d{1,2})\b").expect("PRICE_COMMA_DECIMAL regex")
});

/// Price patterns in priority order. The first pattern whose first match
/// yields an in-range number wins, so the order decides which figure is read
/// from "now/was" style price text.
pub static PRICE_PATTERNS: [&LazyLock<Regex>; 3] =
    [&PRICE_WITH_SYMBOL, &PRICE_DOT_DECIMAL, &PRICE_COMMA_DECIMAL];

/// Any run of digits with an optional decimal part.
pub static NUMBER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("NUMBER_RUN regex"));

// =============================================================================
// Currency Patterns
// =============================================================================

/// Glyphs or ISO codes whose presence marks text as a displayed price.
pub static CURRENCY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$€£¥₹]|USD|EUR|GBP").expect("CURRENCY_MARKER regex"));

/// A single currency glyph or known ISO code, case-insensitive.
pub static CURRENCY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[$€£¥₹]|USD|EUR|GBP|JPY|INR").expect("CURRENCY_TOKEN regex")
});

/// Known currencies and the spellings that refer to them.
///
/// The first element is the ISO code; the aliases are glyphs and lowercase
/// words that may appear on a page instead of the code.
pub const CURRENCY_ALIASES: &[(&str, &[&str])] = &[
    ("USD", &["$", "usd", "dollar"]),
    ("EUR", &["€", "eur", "euro"]),
    ("GBP", &["£", "gbp", "pound"]),
    ("JPY", &["¥", "jpy", "yen"]),
    ("INR", &["₹", "inr", "rupee"]),
];

// =============================================================================
// Attribute Hints
// =============================================================================

/// Heading tags scanned by the title locator, in priority order.
pub const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4"];

/// Class/id fragments marking elements likely to hold the product title.
pub const TITLE_HINTS: &[&str] = &["product", "title", "name"];

/// Class/id fragments marking elements likely to hold the price.
pub const PRICE_HINTS: &[&str] = &["price", "cost", "amount"];

/// Class/id fragments marking elements likely to hold the currency.
pub const CURRENCY_HINTS: &[&str] = &["price", "currency"];

/// Elements whose text is never rendered and is skipped by fallback scans.
pub const UNRENDERED_TAGS: &[&str] = &["script", "style", "noscript", "template"];
