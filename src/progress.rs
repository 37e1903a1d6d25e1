// src/progress.rs
use crate::config::options::DatasetKind;

/// Lightweight progress reporting for a run over several datasets.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of datasets selected.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One dataset extracted with `records` records.
    fn item_done(&mut self, _kind: DatasetKind, _records: usize) {}

    /// One dataset failed; the others carry on.
    fn item_failed(&mut self, _kind: DatasetKind, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
