// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::options::{AppOptions, DatasetKind, ExportOptions},
    error::ScrapeError,
    file,
    progress::Progress,
    record::Record,
    scrape::{self, Collected},
    store,
};

/// What happened to one dataset.
#[derive(Debug)]
pub enum Outcome {
    Written { path: PathBuf, records: usize },
    /// Dry run: extracted, nothing written.
    Extracted { records: usize },
    /// Acquire or extract failed.
    Failed { error: String },
    /// Extracted fine, but the output file could not be written.
    WriteFailed { path: PathBuf, error: String },
}

#[derive(Debug)]
pub struct DatasetReport {
    pub kind: DatasetKind,
    pub outcome: Outcome,
}

/// Summary of what was produced, in selection order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<DatasetReport>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Written { .. } | Outcome::Extracted { .. }))
            .count()
    }

    pub fn files_written(&self) -> Vec<&PathBuf> {
        self.reports
            .iter()
            .filter_map(|r| match &r.outcome {
                Outcome::Written { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn any_write_failed(&self) -> bool {
        self.reports.iter().any(|r| matches!(r.outcome, Outcome::WriteFailed { .. }))
    }

    /// Non-zero exit: nothing succeeded, or a file could not be written.
    pub fn is_failure(&self) -> bool {
        self.succeeded() == 0 || self.any_write_failed()
    }
}

/// Top-level runner: collect every selected dataset, merge persisted
/// fields, then write (unless dry run).
pub fn run(
    options: &AppOptions,
    mut progress: Option<&mut dyn Progress>,
) -> RunSummary {
    let collected = scrape::collect(
        &options.scrape,
        progress.as_deref_mut().map(|p| p as &mut dyn Progress),
    );

    let reports = collected
        .into_iter()
        .map(|Collected { kind, result }| {
            let outcome = match result {
                Ok(asm) => finish_dataset(kind, asm.records, &options.export),
                Err(e) => Outcome::Failed { error: e.to_string() },
            };
            if let Some(p) = progress.as_deref_mut() {
                match &outcome {
                    Outcome::Written { path, records } => {
                        p.log(&format!("{kind}: wrote {records} record(s) to {}", path.display()))
                    }
                    Outcome::WriteFailed { error, .. } => p.log(&format!("{kind}: write failed: {error}")),
                    Outcome::Extracted { .. } | Outcome::Failed { .. } => {}
                }
            }
            DatasetReport { kind, outcome }
        })
        .collect();

    RunSummary { reports }
}

fn finish_dataset(kind: DatasetKind, records: Vec<Record>, export: &ExportOptions) -> Outcome {
    let path = export.out_path(kind);
    let records = if kind == DatasetKind::Cctlds {
        merge_languages(records, export, &path)
    } else {
        records
    };

    if export.dry_run {
        return Outcome::Extracted { records: records.len() };
    }

    match file::write_records(&export.out_dir, kind, &records) {
        Ok(path) => {
            logf!("{kind}: wrote {}", path.display());
            Outcome::Written { path, records: records.len() }
        }
        Err(e) => {
            let e = ScrapeError::from(e);
            loge!("{kind}: {e}");
            Outcome::WriteFailed { path, error: e.to_string() }
        }
    }
}

fn merge_languages(records: Vec<Record>, export: &ExportOptions, previous: &std::path::Path) -> Vec<Record> {
    if !export.merge_previous {
        return store::apply_languages(records, &Default::default());
    }
    let languages = match store::load_languages(previous) {
        Ok(map) => map,
        Err(e) => {
            logw!("ignoring previous {}: {e}", previous.display());
            Default::default()
        }
    };
    logd!("{} persisted language(s) from {}", languages.len(), previous.display());
    store::apply_languages(records, &languages)
}
