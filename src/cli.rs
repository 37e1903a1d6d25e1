// src/cli.rs
use std::{path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};

use crate::config::consts::DEFAULT_OUT_DIR;
use crate::config::options::{
    AppOptions, DatasetKind, DatasetSelector, ExportOptions, ScrapeOptions, Source,
};
use crate::progress::Progress;
use crate::runner::{self, Outcome, RunSummary};

/// Build country reference JSON from Wikipedia tables.
#[derive(Parser, Debug)]
#[command(name = "geo_scrape", version, about)]
pub struct Args {
    /// Dataset(s) to build; repeat or comma-separate. Default: all.
    #[arg(short = 'd', long = "dataset", value_name = "NAME", value_delimiter = ',')]
    pub datasets: Vec<DatasetKind>,

    /// Read `<stem>.html` from this directory instead of fetching.
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Where the JSON files go.
    #[arg(short = 'o', long, value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Ignore cached pages and fetch again.
    #[arg(long, conflicts_with = "input_dir")]
    pub refresh: bool,

    /// Don't carry curated fields over from the previous output.
    #[arg(long)]
    pub no_merge: bool,

    /// Extract and report; write nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// List datasets with their files and sources, then exit.
    #[arg(long)]
    pub list: bool,

    /// More log detail (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn to_options(&self) -> AppOptions {
        let datasets = if self.datasets.is_empty() {
            DatasetSelector::All
        } else {
            DatasetSelector::Some(self.datasets.clone())
        };
        let source = match &self.input_dir {
            Some(dir) => Source::Dir(dir.clone()),
            None => Source::Fetch { refresh: self.refresh },
        };
        AppOptions {
            scrape: ScrapeOptions { datasets, source },
            export: ExportOptions {
                out_dir: self.out_dir.clone(),
                merge_previous: !self.no_merge,
                dry_run: self.dry_run,
            },
        }
    }
}

/// Prints one line per event to stderr.
struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, kind: DatasetKind, records: usize) {
        self.done += 1;
        eprintln!("[{}/{}] {kind}: {records} record(s)", self.done, self.total);
    }

    fn item_failed(&mut self, kind: DatasetKind, msg: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {kind}: FAILED: {msg}", self.done, self.total);
    }
}

pub fn run() -> color_eyre::Result<ExitCode> {
    let args = Args::parse();
    crate::log::init(args.verbose);

    if args.list {
        for kind in DatasetKind::ALL {
            println!("{}\t{}\t{}", kind, kind.output_file(), kind.source_url());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let options = args.to_options();
    let mut progress = CliProgress { total: 0, done: 0 };
    let summary = runner::run(&options, Some(&mut progress));
    print_summary(&summary);

    Ok(if summary.is_failure() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn print_summary(summary: &RunSummary) {
    for r in &summary.reports {
        match &r.outcome {
            Outcome::Written { path, records } => println!("{}: {records} -> {}", r.kind, path.display()),
            Outcome::Extracted { records } => println!("{}: {records} (dry run)", r.kind),
            Outcome::Failed { error } => println!("{}: failed: {error}", r.kind),
            Outcome::WriteFailed { path, error } => {
                println!("{}: could not write {}: {error}", r.kind, path.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dataset_list_and_flags() {
        let args = Args::try_parse_from([
            "geo_scrape", "-d", "vehicle_codes,cctlds", "--dataset", "driving-sides,cctlds",
            "--input-dir", "pages", "-o", "data", "--no-merge",
        ])
        .unwrap();
        let opts = args.to_options();
        assert_eq!(
            opts.scrape.datasets.kinds(),
            [DatasetKind::VehicleCodes, DatasetKind::Cctlds, DatasetKind::DrivingSides]
        );
        assert_eq!(opts.scrape.source, Source::Dir(PathBuf::from("pages")));
        assert_eq!(opts.export.out_dir, PathBuf::from("data"));
        assert!(!opts.export.merge_previous);
        assert!(!opts.export.dry_run);
    }

    #[test]
    fn defaults_select_everything() {
        let opts = Args::try_parse_from(["geo_scrape", "--refresh"]).unwrap().to_options();
        assert_eq!(opts.scrape.datasets, DatasetSelector::All);
        assert_eq!(opts.scrape.source, Source::Fetch { refresh: true });
        assert_eq!(opts.export.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
    }

    #[test]
    fn rejects_unknown_dataset_and_conflicts() {
        assert!(Args::try_parse_from(["geo_scrape", "-d", "zip-codes"]).is_err());
        assert!(Args::try_parse_from(["geo_scrape", "--refresh", "--input-dir", "x"]).is_err());
    }
}
