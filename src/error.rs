//! Error types for price-anchor.
//!
//! Only genuinely exceptional conditions are errors. A locator that finds
//! nothing, a path that resolves to nothing, or a field that cannot be compared
//! are ordinary outcomes and are reported through `Option` and `bool` values.

/// Error type for selector synthesis and validation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTML parsing produced no usable element tree.
    #[error("HTML parsing failed: {0}")]
    Parse(String),

    /// Byte input declares a charset that cannot be decoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A location path string does not follow the `/tag[n]/tag` grammar.
    #[error("Invalid location path: {0}")]
    InvalidPath(String),

    /// A selector set could not be converted to or from JSON.
    #[error("Selector serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for fallible operations.
pub type Result<T> = std::result::Result<T, Error>;
