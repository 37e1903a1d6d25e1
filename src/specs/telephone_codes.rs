// src/specs/telephone_codes.rs
//! International calling codes.
//!
//! Table headed `Country, Territory or Service | Code | ...`; the sample row
//! `Afghanistan ... +93` finds it when the headers have been reworded.

use crate::config::options::DatasetKind;
use crate::core::sanitize::{clean_cell, dial_code, flag_url, FieldKind};
use crate::engine::{DatasetSpec, FieldSpec, KeywordGroup, LocatorPolicy, Marker, RowView};
use crate::record::{CodeRecord, Record};

const COUNTRY: &str = "country";
const CODE: &str = "code";

pub static SPEC: DatasetSpec = DatasetSpec {
    kind: DatasetKind::TelephoneCodes,
    locator: LocatorPolicy {
        headers: &[
            KeywordGroup::any(&["country", "state", "serving"]),
            KeywordGroup::any(&["code"]),
        ],
        min_rows: 2,
        prefer_larger: true,
        markers: &[Marker { values: &["Afghanistan", "+93"], exact: false }],
    },
    fields: &[
        FieldSpec { name: COUNTRY, keywords: &["country", "state", "serving"], default: Some(0) },
        FieldSpec { name: CODE, keywords: &["code"], default: Some(1) },
    ],
    build_row,
};

fn build_row(row: &RowView<'_>) -> Option<Record> {
    let country_cell = row.cell(COUNTRY)?;
    let code = dial_code(&clean_cell(row.cell(CODE)?, FieldKind::Text))?;

    Some(Record::TelephoneCode(CodeRecord {
        code,
        country: clean_cell(country_cell, FieldKind::Text),
        flag: flag_url(country_cell.markup()),
    }))
}
