// ABOUTME: Maps a page's flattened elements into areas of table rows.
// ABOUTME: Single forward pass; unclassed h2 opens an area, thead sets headings, tbody adds rows.

//! Document-to-area mapping.
//!
//! The page is read top to bottom. Every `h2` without a class closes the
//! current area and opens a new one. While an area is open:
//! - a `thead` replaces the current column headings with its `th` texts;
//! - a `tbody` turns each `tr` into a row, pairing the n-th `td` with the
//!   n-th heading. Cells under a missing or blank heading are skipped, and
//!   rows whose kept cells are all blank are dropped.
//!
//! Tables seen before the first area are ignored, headings included.
//! Headings are not cleared when a new area opens.

use tracing::{debug, trace};

use crate::dom::{Document, Element};
use crate::error::ScrapeError;
use crate::result::{Area, Row, TechStack};

const AREA_TAG: &str = "h2";
const HEADER_BLOCK_TAG: &str = "thead";
const BODY_BLOCK_TAG: &str = "tbody";
const ROW_TAG: &str = "tr";
const HEADER_CELL_TAG: &str = "th";
const DATA_CELL_TAG: &str = "td";

/// Map a parsed document, using its `<title>` as the result title.
pub fn map_document(doc: &Document) -> Result<TechStack, ScrapeError> {
    let elements = doc.elements()?;
    Ok(map_elements(elements, doc.title()))
}

/// Map an element sequence that is already in document order.
pub fn map_elements<'a, I>(elements: I, title: impl Into<String>) -> TechStack
where
    I: IntoIterator<Item = Element<'a>>,
{
    elements
        .into_iter()
        .fold(AreaAccumulator::default(), AreaAccumulator::step)
        .finish(title.into())
}

/// Loop state for the mapping pass.
#[derive(Debug, Default)]
struct AreaAccumulator {
    closed: Vec<Area>,
    current: Option<Area>,
    headings: Option<Vec<String>>,
}

impl AreaAccumulator {
    fn step(mut self, el: Element<'_>) -> Self {
        let tag = el.tag();
        if tag == AREA_TAG && !el.has_class() {
            self.open_area(el.text());
            return self;
        }

        let Some(area) = self.current.as_mut() else {
            return self;
        };

        if tag == HEADER_BLOCK_TAG {
            let headings = read_headings(&el);
            debug!(area = %area.name, ?headings, "read column headings");
            self.headings = Some(headings);
        } else if tag == BODY_BLOCK_TAG {
            let headings = self.headings.as_deref().unwrap_or_default();
            for tr in el.find_by_tag(ROW_TAG) {
                match read_row(&tr, headings) {
                    Some(row) => area.technologies.push(row),
                    None => trace!(area = %area.name, "dropped empty row"),
                }
            }
        }
        self
    }

    fn open_area(&mut self, name: String) {
        if let Some(done) = self.current.take() {
            self.closed.push(done);
        }
        debug!(area = %name, "opened area");
        self.current = Some(Area::new(name));
    }

    fn finish(mut self, title: String) -> TechStack {
        if let Some(done) = self.current.take() {
            self.closed.push(done);
        }
        TechStack {
            title,
            areas: self.closed,
        }
    }
}

/// Every `th` of every `tr` in a header block, concatenated in order.
fn read_headings(thead: &Element<'_>) -> Vec<String> {
    thead
        .find_by_tag(ROW_TAG)
        .iter()
        .flat_map(|tr| tr.find_by_tag(HEADER_CELL_TAG))
        .map(|th| th.text())
        .collect()
}

/// Build a row from one `tr`, or `None` if every kept cell is blank.
///
/// The n-th cell pairs with the n-th heading. A missing or blank heading
/// skips its cell without shifting the cells after it.
fn read_row(tr: &Element<'_>, headings: &[String]) -> Option<Row> {
    let mut row = Row::new();
    let mut has_text = false;

    for (td, heading) in tr.find_by_tag(DATA_CELL_TAG).iter().zip(headings) {
        if heading.trim().is_empty() {
            continue;
        }
        let text = td.text();
        if !text.trim().is_empty() {
            has_text = true;
        }
        row.insert(heading.as_str(), text);
    }

    has_text.then_some(row)
}
