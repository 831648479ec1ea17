//! Document Indexer
//!
//! Wraps a `dom_query` document parsed from one HTML string and maps between
//! elements and their [`LocationPath`]. Also provides the small set of
//! node-level text and attribute accessors the locators and the extractor
//! share.

use std::iter;

pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

use crate::error::{Error, Result};
use crate::path::{is_step_tag, LocationPath, Step};
use crate::patterns::UNRENDERED_TAGS;

/// An in-memory element tree built from one HTML string.
///
/// A `ParsedDocument` lives for the duration of one call. Paths produced by
/// [`ParsedDocument::path_of`] resolve back to the same element through
/// [`ParsedDocument::resolve`] on the same instance.
pub struct ParsedDocument {
    document: Document,
}

impl ParsedDocument {
    /// Parse an HTML string.
    ///
    /// Parsing is lenient: malformed markup is repaired the way browsers
    /// repair it. The only failure is a parse that yields no root element.
    ///
    /// # Example
    ///
    /// ```rust
    /// use price_anchor::ParsedDocument;
    ///
    /// let doc = ParsedDocument::parse("<h1>Wireless Mouse</h1>")?;
    /// assert_eq!(doc.elements().len(), 4); // html, head, body, h1
    /// # Ok::<(), price_anchor::Error>(())
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let document = Document::from(html);
        if element_children(&document.root()).next().is_none() {
            return Err(Error::Parse("document has no root element".to_string()));
        }
        log::debug!("Parsed document ({} bytes of HTML)", html.len());
        Ok(Self { document })
    }

    /// The underlying `dom_query` document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// All elements in document order, starting with the root element.
    #[must_use]
    pub fn elements(&self) -> Vec<NodeRef<'_>> {
        self.document.select("*").nodes().to_vec()
    }

    /// Elements matching a CSS selector, in document order.
    #[must_use]
    pub fn select(&self, css: &str) -> Vec<NodeRef<'_>> {
        self.document.select(css).nodes().to_vec()
    }

    /// Resolve a path to the element it addresses, if any.
    ///
    /// Returns `None` when any step has no matching child. A `None` here means
    /// "no such element", never "element with empty text".
    #[must_use]
    pub fn resolve(&self, path: &LocationPath) -> Option<NodeRef<'_>> {
        if path.steps().is_empty() {
            return None;
        }

        let mut current = self.document.root();
        for step in path.steps() {
            current = element_children(&current)
                .filter(|child| tag(child) == step.tag())
                .nth(step.index())?;
        }
        Some(current)
    }

    /// Compute the path of an element of this document.
    ///
    /// The path is built from same-tag sibling positions at every level and
    /// does not depend on `id` or `class` attributes. Returns `None` for
    /// non-element nodes and for elements under a tag name containing
    /// brackets, which no path string can express.
    #[must_use]
    pub fn path_of(&self, node: &NodeRef<'_>) -> Option<LocationPath> {
        if !node.is_element() {
            return None;
        }

        let mut steps = Vec::new();
        let mut current = *node;
        loop {
            let name = tag(&current);
            if !is_step_tag(&name) {
                log::debug!("tag {name:?} cannot be written as a path step");
                return None;
            }
            let parent = current.parent()?;
            let mut same_tag = element_children(&parent).filter(|child| tag(child) == name);
            let count_before = same_tag.by_ref().take_while(|child| child.id != current.id).count();
            let total = count_before + 1 + same_tag.count();
            steps.push(Step::new(name, (total > 1).then_some(count_before + 1)));

            if !parent.is_element() {
                break;
            }
            current = parent;
        }

        steps.reverse();
        Some(LocationPath::new(steps))
    }
}

// === Tree Navigation ===

/// Direct child nodes (elements, text, comments) in order.
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> impl Iterator<Item = NodeRef<'a>> {
    iter::successors(node.first_child(), NodeRef::next_sibling)
}

/// Direct element children in order.
pub fn element_children<'a>(node: &NodeRef<'a>) -> impl Iterator<Item = NodeRef<'a>> {
    child_nodes(node).filter(NodeRef::is_element)
}

/// Parent element, or `None` for the root element.
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(NodeRef::is_element)
}

/// Immediately preceding element sibling, skipping text nodes.
#[must_use]
pub fn previous_element_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    iter::successors(node.prev_sibling(), NodeRef::prev_sibling).find(NodeRef::is_element)
}

/// Immediately following element sibling, skipping text nodes.
#[must_use]
pub fn next_element_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    iter::successors(node.next_sibling(), NodeRef::next_sibling).find(NodeRef::is_element)
}

// === Tag/Attribute Access ===

/// Tag name (lowercase for HTML elements), empty for non-elements.
#[must_use]
pub fn tag(node: &NodeRef<'_>) -> String {
    node.node_name().map(|t| t.to_string()).unwrap_or_default()
}

/// `class` attribute, empty if missing.
#[must_use]
pub fn class_name(node: &NodeRef<'_>) -> String {
    Selection::from(*node)
        .attr("class")
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// `id` attribute, empty if missing.
#[must_use]
pub fn id(node: &NodeRef<'_>) -> String {
    Selection::from(*node)
        .attr("id")
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Whether the element is, or sits inside, an element whose text is never
/// rendered (`script`, `style`, ...).
#[must_use]
pub fn is_unrendered(node: &NodeRef<'_>) -> bool {
    iter::successors(Some(*node), NodeRef::parent)
        .take_while(NodeRef::is_element)
        .any(|n| UNRENDERED_TAGS.contains(&tag(&n).as_str()))
}

// === Text Content ===

/// All descendant text concatenated without separators.
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef<'_>) -> StrTendril {
    Selection::from(*node).text()
}

/// Descendant text nodes joined by single spaces, or `None` when the element
/// holds no text nodes at all.
///
/// Unlike [`text_content`], adjacent inline elements never run together:
/// `<h1>Wireless<br>Mouse</h1>` reads as `"Wireless Mouse"`.
#[must_use]
pub fn joined_text(node: &NodeRef<'_>) -> Option<String> {
    let parts: Vec<String> = node
        .descendants()
        .into_iter()
        .filter(NodeRef::is_text)
        .map(|n| n.text().to_string())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Text of the element's direct text children only, excluding the text of
/// child elements.
#[must_use]
pub fn own_text(node: &NodeRef<'_>) -> String {
    child_nodes(node)
        .filter(NodeRef::is_text)
        .map(|n| n.text().to_string())
        .collect()
}

/// Outer HTML of the element.
#[must_use]
pub fn outer_html(node: &NodeRef<'_>) -> StrTendril {
    Selection::from(*node).html()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> ParsedDocument {
        match ParsedDocument::parse(html) {
            Ok(doc) => doc,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    fn first<'a>(doc: &'a ParsedDocument, css: &str) -> NodeRef<'a> {
        match doc.select(css).first() {
            Some(node) => *node,
            None => panic!("no element matches {css}"),
        }
    }

    #[test]
    fn test_round_trip_every_element() {
        let doc = parse(
            r#"
            <div><p>1</p><p>2</p><span>x</span></div>
            <div><ul><li>a</li><li>b</li><li>c</li></ul></div>
            <section><p>only</p></section>
        "#,
        );

        for node in doc.elements() {
            let path = doc.path_of(&node);
            let Some(path) = path else {
                panic!("element without path: {}", tag(&node));
            };
            let resolved = doc.resolve(&path);
            assert_eq!(resolved.map(|n| n.id), Some(node.id), "round trip failed for {path}");
        }
    }

    #[test]
    fn test_path_positions_only_when_ambiguous() {
        let doc = parse("<div><p>1</p><p id=\"second\">2</p></div><section><p id=\"lone\">3</p></section>");

        let second = first(&doc, "#second");
        let lone = first(&doc, "#lone");

        assert_eq!(doc.path_of(&second).map(|p| p.to_string()).as_deref(), Some("/html/body/div/p[2]"));
        assert_eq!(doc.path_of(&lone).map(|p| p.to_string()).as_deref(), Some("/html/body/section/p"));
    }

    #[test]
    fn test_path_ignores_id_and_class() {
        let a = parse(r#"<div class="x"><span id="a">1</span></div>"#);
        let b = parse(r#"<div class="y"><span id="b">1</span></div>"#);

        let pa = a.path_of(&first(&a, "span"));
        let pb = b.path_of(&first(&b, "span"));
        assert!(pa.is_some());
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_resolve_missing_step_is_none() {
        let doc = parse("<div><p>1</p></div>");

        let missing: LocationPath = match "/html/body/div/p[2]".parse() {
            Ok(path) => path,
            Err(err) => panic!("{err:?}"),
        };
        assert!(doc.resolve(&missing).is_none());

        let wrong_tag: LocationPath = match "/html/body/section".parse() {
            Ok(path) => path,
            Err(err) => panic!("{err:?}"),
        };
        assert!(doc.resolve(&wrong_tag).is_none());
        assert!(doc.resolve(&LocationPath::new(Vec::new())).is_none());
    }

    #[test]
    fn test_odd_tag_names_round_trip_or_are_unaddressable() {
        let doc = parse("<x@y>Wireless Mouse</x@y><a[1]>odd</a[1]>");

        let body = first(&doc, "body");
        let mut children = element_children(&body);
        let (Some(at), Some(bracketed)) = (children.next(), children.next()) else {
            panic!("expected two body children");
        };
        assert_eq!(tag(&at), "x@y");
        assert_eq!(tag(&bracketed), "a[1]");

        let Some(path) = doc.path_of(&at) else {
            panic!("x@y should be addressable");
        };
        assert_eq!(path.to_string(), "/html/body/x@y");
        let reparsed: Option<LocationPath> = path.to_string().parse().ok();
        assert_eq!(reparsed.and_then(|p| doc.resolve(&p)).map(|n| n.id), Some(at.id));

        assert!(doc.path_of(&bracketed).is_none());
    }

    #[test]
    fn test_path_of_text_node_is_none() {
        let doc = parse("<p>hello</p>");
        let p = first(&doc, "p");
        let text = child_nodes(&p).next();

        assert!(text.is_some_and(|t| doc.path_of(&t).is_none()));
    }

    #[test]
    fn test_sibling_navigation_skips_text() {
        let doc = parse(r#"<div><b id="l">€</b> <span id="m">45</span> <i id="r">EUR</i></div>"#);
        let middle = first(&doc, "#m");

        assert_eq!(previous_element_sibling(&middle).map(|n| id(&n)).as_deref(), Some("l"));
        assert_eq!(next_element_sibling(&middle).map(|n| id(&n)).as_deref(), Some("r"));
        assert_eq!(parent_element(&middle).map(|n| tag(&n)).as_deref(), Some("div"));

        let root = first(&doc, "html");
        assert!(parent_element(&root).is_none());
    }

    #[test]
    fn test_text_accessors() {
        let doc = parse("<h1>Wireless<br>Mouse</h1><p>Price: <b>$19.99</b> today</p><img src=x>");
        let h1 = first(&doc, "h1");
        let p = first(&doc, "p");
        let img = first(&doc, "img");

        assert_eq!(text_content(&h1), "WirelessMouse".into());
        assert_eq!(joined_text(&h1).as_deref(), Some("Wireless Mouse"));
        assert_eq!(own_text(&p), "Price:  today");
        assert!(joined_text(&img).is_none());
        assert!(outer_html(&img).contains("<img"));
    }

    #[test]
    fn test_attributes_default_to_empty() {
        let doc = parse(r#"<div id="main" class="product-title">x</div><p>y</p>"#);

        assert_eq!(id(&first(&doc, "div")), "main");
        assert_eq!(class_name(&first(&doc, "div")), "product-title");
        assert_eq!(id(&first(&doc, "p")), "");
        assert_eq!(class_name(&first(&doc, "p")), "");
    }

    #[test]
    fn test_unrendered_detection() {
        let doc = parse("<script>var price = '19.99';</script><noscript><p>n</p></noscript><p>shown</p>");

        assert!(is_unrendered(&first(&doc, "script")));
        assert!(!is_unrendered(&first(&doc, "body > p")));
    }
}
