// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::config::options::DatasetKind;

/// Failure of the pure extraction pipeline for one dataset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No table fits the dataset's locator policy. `spanned` counts tables
    /// that would have matched but use rowspan/colspan.
    #[error("{dataset}: no matching table found ({spanned} candidate(s) skipped for rowspan/colspan)")]
    TableNotFound { dataset: DatasetKind, spanned: usize },
}

/// Failure of one dataset's full run (acquire + extract + persist).
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("input document not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("{0}: worker stopped before reporting")]
    Aborted(DatasetKind),
}
