// src/specs/mod.rs
//! # Dataset specs
//!
//! One module per dataset, each a single [`DatasetSpec`] value: how to find
//! the table on the page, which header keywords name which field, and how a
//! body row becomes a record.
//!
//! ## What lives here
//! - **Locator policy**: required header keywords, size preference and the
//!   content sample used when headers have been reworded.
//! - **Column fields** with their fallback positions.
//! - **Row rules**: field cleaning, code validation, derived fields.
//!
//! ## What does **not** live here
//! - Table location, column resolution, dedup and sorting (`engine`).
//! - Fetching, caching and writing (`core::net`, `scrape`, `file`).
//! - The persisted-language merge for ccTLDs (`store`).
//!
//! Adding a dataset means adding a `DatasetKind` variant and a module here;
//! the engine does not change.
use crate::config::options::DatasetKind;
use crate::engine::DatasetSpec;

pub mod cctlds;
pub mod driving_sides;
pub mod telephone_codes;
pub mod vehicle_codes;

pub fn spec_for(kind: DatasetKind) -> &'static DatasetSpec {
    match kind {
        DatasetKind::Cctlds         => &cctlds::SPEC,
        DatasetKind::DrivingSides   => &driving_sides::SPEC,
        DatasetKind::TelephoneCodes => &telephone_codes::SPEC,
        DatasetKind::VehicleCodes   => &vehicle_codes::SPEC,
    }
}
