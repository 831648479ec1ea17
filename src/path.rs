//! Structural location paths.
//!
//! A [`LocationPath`] addresses one element by the chain of tag names and
//! same-tag sibling positions leading to it from the document root. The string
//! form is the absolute lxml-style path:
//!
//! ```text
//! /html/body/div[2]/span
//! ```
//!
//! `[n]` is 1-based and counted among siblings sharing the tag. It is written
//! only when the parent has more than one child with that tag; a bare step
//! means "the first (and usually only) child with this tag".
//!
//! Paths carry no semantics. They are only meaningful against the document
//! they were computed from, or a document rendered from the same template.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Whether `tag` can appear in the string form of a step: any non-empty text
/// without path separators, brackets or whitespace. The HTML parser accepts
/// almost any text as a tag name (`<x@y>`).
#[must_use]
pub fn is_step_tag(tag: &str) -> bool {
    !tag.is_empty() && !tag.chars().any(|c| matches!(c, '/' | '[' | ']') || c.is_whitespace())
}

/// One step of a location path: a tag name and an optional sibling position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    tag: String,
    position: Option<usize>,
}

impl Step {
    /// Create a step. `position` is 1-based among same-tag siblings.
    #[must_use]
    pub fn new(tag: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            tag: tag.into(),
            position,
        }
    }

    /// Tag name of the addressed element.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Explicit 1-based position among same-tag siblings, if written.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Zero-based index among same-tag siblings.
    #[must_use]
    pub fn index(&self) -> usize {
        self.position.map_or(0, |p| p.saturating_sub(1))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{}[{position}]", self.tag),
            None => f.write_str(&self.tag),
        }
    }
}

impl FromStr for Step {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (tag, position) = match s.strip_suffix(']') {
            Some(rest) => {
                let (tag, index) = rest
                    .split_once('[')
                    .ok_or_else(|| Error::InvalidPath(format!("unbalanced brackets in step {s:?}")))?;
                let position = index
                    .parse::<usize>()
                    .ok()
                    .filter(|p| *p >= 1)
                    .ok_or_else(|| Error::InvalidPath(format!("bad position in step {s:?}")))?;
                (tag, Some(position))
            }
            None => (s, None),
        };

        if !is_step_tag(tag) {
            return Err(Error::InvalidPath(format!("bad tag name in step {s:?}")));
        }

        Ok(Self::new(tag, position))
    }
}

/// Absolute structural address of one element in a parsed document.
///
/// # Example
///
/// ```rust
/// use price_anchor::LocationPath;
///
/// let path: LocationPath = "/html/body/div[2]/span".parse()?;
/// assert_eq!(path.steps().len(), 4);
/// assert_eq!(path.to_string(), "/html/body/div[2]/span");
/// # Ok::<(), price_anchor::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationPath {
    steps: Vec<Step>,
}

impl LocationPath {
    /// Build a path from root-first steps.
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Steps from the document root down to the addressed element.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Depth of the addressed element (the root element has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Display for LocationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}

impl FromStr for LocationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let body = s
            .trim()
            .strip_prefix('/')
            .ok_or_else(|| Error::InvalidPath(format!("path must be absolute: {s:?}")))?;
        if body.is_empty() {
            return Err(Error::InvalidPath("path has no steps".to_string()));
        }

        let steps = body
            .split('/')
            .map(Step::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }
}

impl TryFrom<String> for LocationPath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LocationPath> for String {
    fn from(path: LocationPath) -> Self {
        path.to_string()
    }
}
