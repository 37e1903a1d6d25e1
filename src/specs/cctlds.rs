// src/specs/cctlds.rs
//! Country-code top-level domains.
//!
//! Table: the big "Country code top-level domains" table, headed
//! `Name | Entity | Explanation | Notes | ...`. Falls back to the first table
//! holding a `.ad` cell.

use crate::config::consts::DEFAULT_LANGUAGE;
use crate::config::options::DatasetKind;
use crate::core::sanitize::{clean_cell, flag_url, unwrap_anchors, FieldKind};
use crate::engine::{DatasetSpec, FieldSpec, KeywordGroup, LocatorPolicy, Marker, RowView};
use crate::record::{CctldRecord, Record};

const CODE: &str = "code";
const COUNTRY: &str = "country";
const EXPLANATION: &str = "explanation";
const NOTES: &str = "notes";

pub static SPEC: DatasetSpec = DatasetSpec {
    kind: DatasetKind::Cctlds,
    locator: LocatorPolicy {
        headers: &[
            KeywordGroup::any(&["name"]),
            KeywordGroup::any(&["entity", "country"]),
        ],
        min_rows: 2,
        prefer_larger: true,
        markers: &[Marker { values: &[".ad"], exact: true }],
    },
    fields: &[
        FieldSpec { name: CODE, keywords: &["name", "domain"], default: Some(0) },
        FieldSpec { name: COUNTRY, keywords: &["entity", "country"], default: Some(1) },
        FieldSpec { name: EXPLANATION, keywords: &["explanation"], default: Some(2) },
        FieldSpec { name: NOTES, keywords: &["notes"], default: Some(3) },
    ],
    build_row,
};

fn build_row(row: &RowView<'_>) -> Option<Record> {
    let code = clean_cell(row.cell(CODE)?, FieldKind::Code).to_lowercase();
    if !code.starts_with('.') || code.contains(char::is_whitespace) {
        return None;
    }
    let country_cell = row.cell(COUNTRY)?;

    Some(Record::Cctld(CctldRecord {
        code,
        country: clean_cell(country_cell, FieldKind::Text),
        flag: flag_url(country_cell.markup()),
        explanation: row.cell(EXPLANATION).map(|c| unwrap_anchors(c.markup())).unwrap_or_default(),
        notes: row.cell(NOTES).map(|c| clean_cell(c, FieldKind::Text)).unwrap_or_default(),
        language: s!(DEFAULT_LANGUAGE),
    }))
}
