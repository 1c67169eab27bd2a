// ABOUTME: DOM traversal utilities over scraper's parsed HTML tree.
// ABOUTME: Exposes a flattened, document-ordered element view used by the mapper.

//! DOM utilities for walking a parsed page.
//!
//! The mapper only needs five things from a page: its title, the body's
//! elements in source order, and per element the tag name, trimmed text,
//! attribute lookup and descendant search by tag. `Document` and `Element`
//! provide exactly that on top of `scraper::Html`.

pub mod document;
pub mod text;

pub use document::{Document, Element};
