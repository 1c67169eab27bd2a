// ABOUTME: TechStack, Area and Row types holding the areas mapped from a page.
// ABOUTME: Owns the JSON contract: capitalised keys, empty lists omitted, rows keep heading order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ScrapeError;

/// The mapped page: its title and the areas found under unclassed `h2` headings.
///
/// Empty `Area` lists are omitted when serialized, so a page without any
/// qualifying heading renders as `{"Title": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TechStack {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Area", default, skip_serializing_if = "Vec::is_empty")]
    pub areas: Vec<Area>,
}

/// One heading section and the non-empty table rows that followed it.
///
/// `Technologies` is omitted from the JSON when no row was kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Area {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Technologies", default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<Row>,
}

/// A table row keyed by column heading, in heading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// An empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell for `heading`. A repeated heading overwrites the earlier
    /// value in place.
    pub fn insert(&mut self, heading: impl Into<String>, text: impl Into<String>) {
        self.0.insert(heading.into(), Value::String(text.into()));
    }

    /// Cell text under `heading`, if the row has one.
    pub fn get(&self, heading: &str) -> Option<&str> {
        self.0.get(heading).and_then(Value::as_str)
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(heading, text)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str().unwrap_or_default()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Area {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            technologies: Vec::new(),
        }
    }
}

impl TechStack {
    /// Returns true if no area was found.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// First area with the given name.
    pub fn area(&self, name: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.name == name)
    }

    /// Total number of rows across all areas.
    pub fn technology_count(&self) -> usize {
        self.areas.iter().map(|a| a.technologies.len()).sum()
    }

    /// Serialize with a 2-space indent.
    pub fn to_json_pretty(&self) -> Result<String, ScrapeError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScrapeError::output("", "Serialize", Some(e.into())))
    }

    /// Serialize on a single line.
    pub fn to_json(&self) -> Result<String, ScrapeError> {
        serde_json::to_string(self).map_err(|e| ScrapeError::output("", "Serialize", Some(e.into())))
    }
}
