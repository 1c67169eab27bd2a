// ABOUTME: Document and Element wrappers around scraper's Html and ElementRef.
// ABOUTME: Flattens the body into document order and offers tag, text, attr and descendant lookup.

use scraper::{ElementRef, Html};

use crate::dom::text::subtree_text;
use crate::error::ScrapeError;

/// A parsed HTML page. Immutable once parsed.
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse an HTML string. html5ever is lenient, so this never fails.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Text of the first `<title>` in the head, or an empty string.
    pub fn title(&self) -> String {
        self.top_level("head")
            .and_then(|head| {
                head.descendants()
                    .filter_map(ElementRef::wrap)
                    .find(|el| el.value().name() == "title")
            })
            .map(|el| subtree_text(*el))
            .unwrap_or_default()
    }

    /// The body element followed by all of its descendant elements, in source order.
    ///
    /// Fails only for documents that have no `<body>`, such as frameset pages.
    pub fn elements(&self) -> Result<Vec<Element<'_>>, ScrapeError> {
        let body = self.top_level("body").ok_or_else(|| {
            ScrapeError::parse("", "Elements", Some(anyhow::anyhow!("document has no body")))
        })?;

        Ok(Element::new(body).find_all())
    }

    /// A direct child of `<html>` with the given name.
    fn top_level(&self, name: &str) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == name)
    }
}

/// A borrowed view of one element in a `Document`.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl<'a> Element<'a> {
    fn new(inner: ElementRef<'a>) -> Self {
        Self { inner }
    }

    /// Lower-case local tag name.
    pub fn tag(&self) -> &'a str {
        self.inner.value().name()
    }

    /// Whitespace-normalized text of this element and its descendants.
    pub fn text(&self) -> String {
        subtree_text(*self.inner)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// True when the `class` attribute has any non-whitespace content.
    pub fn has_class(&self) -> bool {
        self.attr("class").is_some_and(|c| !c.trim().is_empty())
    }

    /// This element (if it matches) and every descendant with the given tag,
    /// in document order.
    pub fn find_by_tag(&self, tag: &str) -> Vec<Element<'a>> {
        self.inner
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name().eq_ignore_ascii_case(tag))
            .map(Element::new)
            .collect()
    }

    fn find_all(&self) -> Vec<Element<'a>> {
        self.inner
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(Element::new)
            .collect()
    }
}
