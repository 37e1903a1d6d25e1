// src/specs/vehicle_codes.rs
//! International vehicle registration codes (the oval sticker).

use crate::config::options::DatasetKind;
use crate::core::sanitize::{clean_cell, flag_url, FieldKind};
use crate::engine::{DatasetSpec, FieldSpec, KeywordGroup, LocatorPolicy, Marker, RowView};
use crate::record::{CodeRecord, Record};

const CODE: &str = "code";
const COUNTRY: &str = "country";

pub static SPEC: DatasetSpec = DatasetSpec {
    kind: DatasetKind::VehicleCodes,
    locator: LocatorPolicy {
        // "Country code" style headers belong to other tables on the page
        headers: &[KeywordGroup::exact(&["code"]), KeywordGroup::exact(&["country"])],
        min_rows: 2,
        prefer_larger: true,
        markers: &[Marker { values: &["AFG"], exact: true }],
    },
    fields: &[
        FieldSpec { name: CODE, keywords: &["code"], default: Some(0) },
        FieldSpec { name: COUNTRY, keywords: &["country"], default: Some(1) },
    ],
    build_row,
};

fn build_row(row: &RowView<'_>) -> Option<Record> {
    let country_cell = row.cell(COUNTRY)?;
    Some(Record::VehicleCode(CodeRecord {
        code: clean_cell(row.cell(CODE)?, FieldKind::Code),
        country: clean_cell(country_cell, FieldKind::Text),
        flag: flag_url(country_cell.markup()),
    }))
}
