// src/engine/engine.rs
use std::collections::HashSet;

use crate::core::grid::Document;
use crate::error::ExtractError;
use crate::record::Record;

use super::columns::resolve_with_defaults;
use super::locate::{locate, Strategy};
use super::types::{DatasetSpec, RowView};

/// Records of one dataset plus what was dropped on the way.
#[derive(Clone, Debug)]
pub struct Assembly {
    /// Unique by key, sorted by lower-cased key.
    pub records: Vec<Record>,
    pub table_index: usize,
    pub strategy: Strategy,
    /// Body rows seen (header excluded).
    pub rows: usize,
    pub rejected: usize,
    pub duplicates: usize,
}

/// Parse, locate, resolve columns, build rows, dedup and sort.
pub fn extract(html: &str, spec: &DatasetSpec) -> Result<Assembly, ExtractError> {
    let doc = Document::parse(html);
    if doc.stray_end_tags() > 0 {
        logd!("{}: {} stray end tag(s) ignored", spec.kind, doc.stray_end_tags());
    }
    assemble(&doc, spec)
}

pub fn assemble(doc: &Document, spec: &DatasetSpec) -> Result<Assembly, ExtractError> {
    let located = locate(doc, &spec.locator).map_err(|nf| ExtractError::TableNotFound {
        dataset: spec.kind,
        spanned: nf.spanned,
    })?;
    logd!(
        "{}: table #{} via {:?} ({} rows)",
        spec.kind, located.index, located.strategy, located.table.len()
    );

    let columns = resolve_with_defaults(located.table.header(), spec.fields);
    let body = located.table.body();

    let mut records = Vec::with_capacity(body.len());
    let mut seen: HashSet<String> = HashSet::with_capacity(body.len());
    let (mut rejected, mut duplicates) = (0usize, 0usize);

    for (ix, row) in body.iter().enumerate() {
        let view = RowView::new(row, &columns);
        let record = match (spec.build_row)(&view) {
            Some(r) if !r.key().is_empty() && !r.country().is_empty() => r,
            _ => {
                logd!("{}: row {} rejected", spec.kind, ix + 1);
                rejected += 1;
                continue;
            }
        };
        // first occurrence wins
        if !seen.insert(s!(record.key())) {
            logd!("{}: duplicate key {:?}", spec.kind, record.key());
            duplicates += 1;
            continue;
        }
        records.push(record);
    }

    records.sort_by_cached_key(|r| r.key().to_lowercase());

    logd!(
        "{}: {} record(s), {} rejected, {} duplicate(s)",
        spec.kind, records.len(), rejected, duplicates
    );

    Ok(Assembly {
        records,
        table_index: located.index,
        strategy: located.strategy,
        rows: body.len(),
        rejected,
        duplicates,
    })
}
