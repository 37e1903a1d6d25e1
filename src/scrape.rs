// src/scrape.rs
use std::{
    fs, thread, time::Duration,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }}
};

use crate::{
    config::consts::{ WORKERS, REQUEST_PAUSE_MS },
    config::options::{ DatasetKind, ScrapeOptions, Source },
    core::net,
    engine::{ self, Assembly },
    error::ScrapeError,
    progress::Progress,
    specs,
};

/// Result of one dataset's pipeline.
#[derive(Debug)]
pub struct Collected {
    pub kind: DatasetKind,
    pub result: Result<Assembly, ScrapeError>,
}

/// Source document for one dataset: fetched (with cache) or read from disk.
pub fn acquire(kind: DatasetKind, source: &Source) -> Result<String, ScrapeError> {
    match source {
        Source::Fetch { refresh } => net::fetch(kind.source_url(), *refresh),
        Source::Dir(dir) => {
            let path = dir.join(kind.input_file());
            if !path.is_file() {
                return Err(ScrapeError::MissingInput { path });
            }
            logd!("{kind}: reading {}", path.display());
            Ok(fs::read_to_string(&path)?)
        }
    }
}

/// Acquire + extract for a single dataset.
pub fn collect_one(kind: DatasetKind, source: &Source) -> Result<Assembly, ScrapeError> {
    logf!("{kind}: extracting");
    let html = acquire(kind, source)?;
    let assembly = engine::extract(&html, specs::spec_for(kind))?;
    Ok(assembly)
}

/// Run every selected dataset on the worker pool (no writes).
/// Results are in selection order whatever order the workers finish in.
pub fn collect(
    scrape: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<Collected> {
    let kinds = scrape.datasets.kinds();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(kinds.len());
        p.log(&format!("Extracting {} dataset(s)…", kinds.len()));
    }

    // Concurrency
    let kinds_arc = Arc::new(kinds.clone());
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<Assembly, ScrapeError>)>();

    let workers = WORKERS.min(kinds.len()).max(1);
    let pause = match scrape.source {
        Source::Fetch { .. } => Duration::from_millis(REQUEST_PAUSE_MS),
        Source::Dir(_) => Duration::ZERO,
    };

    for _ in 0..workers {
        let kinds = Arc::clone(&kinds_arc);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();
        let source = scrape.source.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= kinds.len() {
                    break;
                }
                let result = collect_one(kinds[i], &source);
                if tx.send((i, result)).is_err() {
                    break;
                }
                thread::sleep(pause); // be polite
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    // Aggregate results
    let mut slots: Vec<Option<Result<Assembly, ScrapeError>>> = kinds.iter().map(|_| None).collect();

    for _ in 0..kinds.len() {
        let Ok((i, result)) = res_rx.recv() else {
            break; // workers ended early
        };
        let kind = kinds[i];
        match &result {
            Ok(asm) => {
                logf!(
                    "{kind}: {} record(s) from table #{}, {} rejected, {} duplicate(s)",
                    asm.records.len(), asm.table_index, asm.rejected, asm.duplicates
                );
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(kind, asm.records.len());
                }
            }
            Err(e) => {
                match e {
                    ScrapeError::Extract(_) => logw!("{kind}: skipped: {e}"),
                    _ => loge!("{kind}: {e}"),
                }
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(kind, &e.to_string());
                }
            }
        }
        slots[i] = Some(result);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    kinds
        .into_iter()
        .zip(slots)
        .map(|(kind, slot)| Collected {
            kind,
            result: slot.unwrap_or_else(|| Err(ScrapeError::Aborted(kind))),
        })
        .collect()
}
