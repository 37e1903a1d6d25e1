// src/engine/locate.rs
//! Table locator.
//!
//! Two strategies, tried in order:
//! 1. **Header keywords**: row 0 must satisfy every [`KeywordGroup`] of the
//!    policy. First match wins, or the largest match when the policy prefers
//!    larger tables (ties go to the earlier table).
//! 2. **Content sample**: the first table with a row matching one of the
//!    policy's [`Marker`]s.
//!
//! Tables using rowspan/colspan are never selected: their flat grid is not
//! column-aligned. They are counted so the caller can say why nothing matched.

use crate::core::grid::{Document, Table};
use super::types::{header_key, KeywordGroup, LocatorPolicy};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    HeaderKeywords,
    ContentSample,
}

#[derive(Clone, Copy, Debug)]
pub struct Located<'d> {
    pub table: &'d Table,
    /// Position of the table in the document.
    pub index: usize,
    pub strategy: Strategy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotFound {
    /// Candidates rejected for rowspan/colspan.
    pub spanned: usize,
}

pub fn locate<'d>(doc: &'d Document, policy: &LocatorPolicy) -> Result<Located<'d>, NotFound> {
    let mut spanned: Vec<usize> = Vec::new();
    let mut note_spanned = |ix: usize| {
        if !spanned.contains(&ix) { spanned.push(ix); }
    };

    if !policy.headers.is_empty() {
        let mut best: Option<(usize, &Table)> = None;
        for (ix, table) in doc.tables().iter().enumerate() {
            if table.len() < policy.min_rows || !header_matches(table, policy.headers) {
                continue;
            }
            if table.has_spans() {
                note_spanned(ix);
                continue;
            }
            match best {
                None => {
                    best = Some((ix, table));
                    if !policy.prefer_larger { break; }
                }
                Some((_, b)) if table.len() > b.len() => best = Some((ix, table)),
                Some(_) => {}
            }
        }
        if let Some((index, table)) = best {
            return Ok(Located { table, index, strategy: Strategy::HeaderKeywords });
        }
    }

    for (ix, table) in doc.tables().iter().enumerate() {
        if table.len() < policy.min_rows {
            continue;
        }
        let sampled = table
            .rows()
            .iter()
            .any(|row| policy.markers.iter().any(|m| m.matches(row)));
        if !sampled {
            continue;
        }
        if table.has_spans() {
            note_spanned(ix);
            continue;
        }
        return Ok(Located { table, index: ix, strategy: Strategy::ContentSample });
    }

    Err(NotFound { spanned: spanned.len() })
}

/// Every group matches at least one header cell.
fn header_matches(table: &Table, groups: &[KeywordGroup]) -> bool {
    let Some(header) = table.header() else { return false };
    let keys: Vec<String> = header.texts().map(header_key).collect();
    groups.iter().all(|g| keys.iter().any(|k| g.matches(k)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Marker;

    const GROUPS: &[KeywordGroup] = &[
        KeywordGroup::any(&["country", "state"]),
        KeywordGroup::any(&["code"]),
    ];
    const MARKERS: &[Marker] = &[Marker { values: &["Afghanistan", "+93"], exact: false }];

    fn policy(prefer_larger: bool) -> LocatorPolicy {
        LocatorPolicy { headers: GROUPS, min_rows: 2, prefer_larger, markers: MARKERS }
    }

    fn table(header: &str, rows: usize) -> String {
        let mut s = format!("<table><tr>{header}</tr>");
        for i in 0..rows {
            s.push_str(&format!("<tr><td>C{i}</td><td>+{i}</td></tr>"));
        }
        s.push_str("</table>");
        s
    }

    #[test]
    fn header_match_prefers_larger_table() {
        let html = [
            table("<th>Notes</th>", 9),
            table("<th>Country</th><th>Code</th>", 2),
            table("<th>State</th><th>Dial code</th>", 5),
            table("<th>Country</th><th>Code</th>", 5),
        ]
        .concat();
        let doc = Document::parse(&html);

        let found = locate(&doc, &policy(true)).unwrap();
        assert_eq!(found.index, 2);
        assert_eq!(found.strategy, Strategy::HeaderKeywords);

        let first = locate(&doc, &policy(false)).unwrap();
        assert_eq!(first.index, 1);
    }

    #[test]
    fn header_needs_every_group() {
        let doc = Document::parse(&table("<th>Country</th><th>Capital</th>", 3));
        assert_eq!(locate(&doc, &policy(true)).unwrap_err(), NotFound { spanned: 0 });
    }

    #[test]
    fn min_rows_filters_small_tables() {
        let doc = Document::parse(&table("<th>Country</th><th>Code</th>", 0));
        assert!(locate(&doc, &policy(true)).is_err());
    }

    #[test]
    fn content_sample_fallback() {
        let html = [
            table("<th>Misc</th>", 3),
            s!("<table><tr><td>x</td></tr><tr><td>Afghanistan</td><td>+93</td></tr></table>"),
        ]
        .concat();
        let doc = Document::parse(&html);
        let found = locate(&doc, &policy(true)).unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.strategy, Strategy::ContentSample);
    }

    #[test]
    fn marker_values_must_share_a_row() {
        let html = "<table><tr><td>Afghanistan</td></tr><tr><td>+93</td></tr></table>";
        let doc = Document::parse(html);
        assert!(locate(&doc, &policy(true)).is_err());
    }

    #[test]
    fn exact_marker_decodes_before_stripping_citations() {
        let marker = Marker { values: &[".ad"], exact: true };
        let doc = Document::parse("<table><tr><td>.AD&#91;1&#93;</td></tr><tr><td>.ad&nbsp;x</td></tr></table>");
        let rows = doc.tables()[0].rows();
        assert!(marker.matches(&rows[0]));
        assert!(!marker.matches(&rows[1]));
    }

    #[test]
    fn spanned_tables_are_refused() {
        let html = r#"<table><tr><th colspan="2">Country</th><th>Code</th></tr>
            <tr><td>Afghanistan</td><td>+93</td></tr></table>"#;
        let doc = Document::parse(html);
        assert_eq!(locate(&doc, &policy(true)).unwrap_err(), NotFound { spanned: 1 });
    }
}
