// src/engine/columns.rs
//! Column resolver: header labels → field positions.

use crate::core::grid::Row;
use super::types::{header_key, ColumnMap, FieldSpec};

/// For each field, the first header cell (left to right) whose lower-cased
/// text contains one of the field's keywords. Unmatched fields are absent.
pub fn resolve(header: &Row, fields: &[FieldSpec]) -> ColumnMap {
    let keys: Vec<String> = header.texts().map(header_key).collect();
    let mut map = ColumnMap::default();
    for field in fields {
        if let Some(ix) = keys.iter().position(|k| field.keywords.iter().any(|kw| k.contains(kw))) {
            map.insert(field.name, ix);
        }
    }
    map
}

/// [`resolve`], then the field's default column for anything unmatched.
/// Fields with neither stay absent.
pub fn resolve_with_defaults(header: Option<&Row>, fields: &[FieldSpec]) -> ColumnMap {
    let mut map = header.map(|h| resolve(h, fields)).unwrap_or_default();
    for field in fields {
        if let Some(ix) = field.default {
            map.insert(field.name, ix);
        }
    }
    map
}
