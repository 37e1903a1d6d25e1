// src/engine/types.rs
use crate::config::options::DatasetKind;
use crate::core::grid::{Cell, Row};
use crate::core::sanitize::{decode_entities, normalize_ws, strip_citations};
use crate::record::Record;

/* Generic table spec */

/// One required header: some header cell must match one of `keywords`.
#[derive(Clone, Copy, Debug)]
pub struct KeywordGroup {
    pub keywords: &'static [&'static str],
    /// Whole-cell match instead of substring.
    pub exact: bool,
}

impl KeywordGroup {
    pub const fn any(keywords: &'static [&'static str]) -> Self {
        Self { keywords, exact: false }
    }

    pub const fn exact(keywords: &'static [&'static str]) -> Self {
        Self { keywords, exact: true }
    }

    /// `header` must already be normalized with [`header_key`].
    pub fn matches(&self, header: &str) -> bool {
        self.keywords.iter().any(|k| if self.exact { header == *k } else { header.contains(k) })
    }
}

/// Content sample: all `values` occur in cells of one and the same row.
#[derive(Clone, Copy, Debug)]
pub struct Marker {
    pub values: &'static [&'static str],
    /// Whole-cell, ASCII case-insensitive match instead of substring.
    pub exact: bool,
}

impl Marker {
    /// Cells are compared with entities decoded and citations stripped.
    pub fn matches(&self, row: &Row) -> bool {
        if self.values.is_empty() {
            return false;
        }
        let cells: Vec<String> = row.cells().iter().map(|c| marker_text(c.text())).collect();
        self.values.iter().all(|v| {
            cells.iter().any(|c| if self.exact { c.eq_ignore_ascii_case(v) } else { c.contains(v) })
        })
    }
}

/// How to recognise a dataset's table among all tables of a page.
#[derive(Clone, Copy, Debug)]
pub struct LocatorPolicy {
    /// Every group must match a cell of row 0 (case-insensitive).
    pub headers: &'static [KeywordGroup],
    /// Tables with fewer rows (header included) are never candidates.
    pub min_rows: usize,
    /// Among header matches take the one with most rows instead of the first.
    pub prefer_larger: bool,
    /// Fallback when no header match: first table with a row matching any marker.
    pub markers: &'static [Marker],
}

/// A semantic column: its header keywords and the column used when no header matches.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub default: Option<usize>,
}

/// Field name → zero-based column index. Fields may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnMap {
    entries: Vec<(&'static str, usize)>,
}

impl ColumnMap {
    pub fn get(&self, field: &str) -> Option<usize> {
        self.entries.iter().find(|(name, _)| *name == field).map(|&(_, ix)| ix)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// First insert wins.
    pub(crate) fn insert(&mut self, field: &'static str, ix: usize) {
        if !self.contains(field) {
            self.entries.push((field, ix));
        }
    }
}

/// A body row seen through a dataset's column map.
pub struct RowView<'a> {
    row: &'a Row,
    columns: &'a ColumnMap,
}

impl<'a> RowView<'a> {
    pub fn new(row: &'a Row, columns: &'a ColumnMap) -> Self {
        Self { row, columns }
    }

    /// Cell of a field; `None` if the field is unmapped or the row is short.
    pub fn cell(&self, field: &str) -> Option<&'a Cell> {
        self.columns.get(field).and_then(|ix| self.row.get(ix))
    }

}

/// Turns one body row into a record, or `None` to reject the row.
pub type RowBuilder = fn(&RowView<'_>) -> Option<Record>;

/// Everything dataset-specific about an extraction, as data.
#[derive(Clone, Copy, Debug)]
pub struct DatasetSpec {
    pub kind: DatasetKind,
    pub locator: LocatorPolicy,
    pub fields: &'static [FieldSpec],
    pub build_row: RowBuilder,
}

fn marker_text(text: &str) -> String {
    normalize_ws(&strip_citations(&decode_entities(text)))
}

/// Header text as compared against keywords: entities decoded, citations
/// out, whitespace collapsed, lower-cased.
pub fn header_key(text: &str) -> String {
    marker_text(text).to_lowercase()
}
