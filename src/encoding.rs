//! Byte input decoding.
//!
//! Pages handed over as raw bytes are decoded to UTF-8 before parsing. The
//! encoding is picked from a byte order mark, then from a charset declaration
//! in the first 1024 bytes, then defaults to UTF-8.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

use crate::error::{Error, Result};

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).expect("valid regex"));

/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`
#[allow(clippy::expect_used)]
static HTTP_EQUIV_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>;]+)"#)
        .expect("valid regex")
});

const SNIFF_LEN: usize = 1024;

/// Charset label declared in the head of the document, if any.
#[must_use]
pub fn declared_charset(html: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    [&*META_CHARSET, &*HTTP_EQUIV_CHARSET]
        .iter()
        .find_map(|re| re.captures(&head)?.get(1).map(|m| m.as_str().to_string()))
}

/// Pick the encoding for `html`.
///
/// A byte order mark wins over any declaration. Declared labels map to their
/// output encoding, so a meta-declared UTF-16 reads as UTF-8. An unrecognized
/// declared label is tolerated only when the bytes are valid UTF-8.
pub fn detect_encoding(html: &[u8]) -> Result<&'static Encoding> {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return Ok(encoding);
    }

    let Some(label) = declared_charset(html) else {
        return Ok(UTF_8);
    };

    match Encoding::for_label(label.trim().as_bytes()) {
        Some(encoding) => Ok(encoding.output_encoding()),
        None if std::str::from_utf8(html).is_ok() => {
            log::debug!("unknown charset {label:?}, input is valid UTF-8");
            Ok(UTF_8)
        }
        None => Err(Error::Encoding(format!("unsupported charset {label:?}"))),
    }
}

/// Decode `html` to a UTF-8 string. Malformed sequences become U+FFFD.
///
/// ```rust
/// use price_anchor::encoding::decode_html;
///
/// let html = b"<meta charset=\"windows-1252\"><span>\x80 12,50</span>";
/// let text = decode_html(html)?;
/// assert!(text.contains("\u{20AC} 12,50"));
/// # Ok::<(), price_anchor::Error>(())
/// ```
pub fn decode_html(html: &[u8]) -> Result<String> {
    let encoding = detect_encoding(html)?;

    // decode() strips a BOM matching the detected encoding
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        log::debug!("input had malformed {} sequences", used.name());
    }
    Ok(decoded.into_owned())
}
