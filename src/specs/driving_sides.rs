// src/specs/driving_sides.rs
//! Left- and right-hand traffic by country.
//!
//! Table headed `Country | Side | Date of switch | ...`. No content fallback:
//! the page has several small tables that would match a sample.

use crate::config::options::DatasetKind;
use crate::core::sanitize::{classify_side, clean_cell, first_year, flag_url, FieldKind};
use crate::engine::{DatasetSpec, FieldSpec, KeywordGroup, LocatorPolicy, RowView};
use crate::record::{DrivingSideRecord, Record};

const COUNTRY: &str = "country";
const SIDE: &str = "side";
const SWITCH: &str = "switch";

pub static SPEC: DatasetSpec = DatasetSpec {
    kind: DatasetKind::DrivingSides,
    locator: LocatorPolicy {
        headers: &[
            KeywordGroup::any(&["country"]),
            KeywordGroup::any(&["side", "traffic"]),
        ],
        min_rows: 2,
        prefer_larger: true,
        markers: &[],
    },
    fields: &[
        FieldSpec { name: COUNTRY, keywords: &["country"], default: Some(0) },
        FieldSpec { name: SIDE, keywords: &["side", "traffic"], default: Some(1) },
        FieldSpec { name: SWITCH, keywords: &["switch", "change"], default: None },
    ],
    build_row,
};

fn build_row(row: &RowView<'_>) -> Option<Record> {
    let country_cell = row.cell(COUNTRY)?;
    let side = classify_side(&clean_cell(row.cell(SIDE)?, FieldKind::Text));
    let year = row
        .cell(SWITCH)
        .and_then(|c| first_year(&clean_cell(c, FieldKind::Text)));

    let mut explanation = format!("Drives on the <b>{}</b>.", side.as_str());
    if let Some(year) = &year {
        explanation.push_str(&format!(" (Switched in {year})"));
    }

    Some(Record::DrivingSide(DrivingSideRecord {
        country: clean_cell(country_cell, FieldKind::Text),
        side,
        flag: flag_url(country_cell.markup()),
        explanation,
        switched: year.is_some(),
    }))
}
