// src/file.rs

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::options::DatasetKind;
use crate::record::Record;

/// Write one dataset's records as `<dir>/<stem>.json`.
/// Returns the final path written to.
pub fn write_records(dir: &Path, kind: DatasetKind, records: &[Record]) -> io::Result<PathBuf> {
    ensure_directory(dir)?;
    let path = dir.join(kind.output_file());
    let contents = to_json(records, kind.indent()).map_err(io::Error::other)?;
    fs::write(&path, contents)?;
    Ok(path)
}

/// Pretty JSON array with `indent` spaces per level and a trailing newline.
pub fn to_json(records: &[Record], indent: usize) -> serde_json::Result<String> {
    let pad = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(pad.as_bytes()));
    records.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only emits UTF-8
    Ok(String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
