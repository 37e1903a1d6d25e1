// src/engine/mod.rs
//! Generic table extraction, driven by [`types::DatasetSpec`] data.
//!
//! `Document` → locate table → resolve columns → build rows → dedup + sort.
//! Nothing in here knows about a particular dataset.
pub mod columns;
pub mod engine;
pub mod locate;
pub mod types;

pub use engine::{assemble, extract, Assembly};
pub use locate::{Located, Strategy};
pub use types::{DatasetSpec, FieldSpec, KeywordGroup, LocatorPolicy, Marker, RowView};
