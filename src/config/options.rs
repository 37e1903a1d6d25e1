// src/config/options.rs
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// The four datasets this tool knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatasetKind {
    Cctlds,
    DrivingSides,
    TelephoneCodes,
    VehicleCodes,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::Cctlds,
        DatasetKind::DrivingSides,
        DatasetKind::TelephoneCodes,
        DatasetKind::VehicleCodes,
    ];

    /// Name used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::Cctlds         => "cctlds",
            DatasetKind::DrivingSides   => "driving-sides",
            DatasetKind::TelephoneCodes => "telephone-codes",
            DatasetKind::VehicleCodes   => "vehicle-codes",
        }
    }

    /// Stem shared by the output JSON and a local input document.
    pub fn file_stem(self) -> &'static str {
        match self {
            DatasetKind::Cctlds         => "cctlds",
            DatasetKind::DrivingSides   => "driving_sides",
            DatasetKind::TelephoneCodes => "telephone_codes",
            DatasetKind::VehicleCodes   => "vehicle_codes",
        }
    }

    pub fn source_url(self) -> &'static str {
        match self {
            DatasetKind::Cctlds         => CCTLDS_URL,
            DatasetKind::DrivingSides   => DRIVING_SIDES_URL,
            DatasetKind::TelephoneCodes => TELEPHONE_CODES_URL,
            DatasetKind::VehicleCodes   => VEHICLE_CODES_URL,
        }
    }

    /// JSON indentation width of the written file.
    pub fn indent(self) -> usize {
        match self {
            DatasetKind::Cctlds | DatasetKind::DrivingSides => 4,
            DatasetKind::TelephoneCodes | DatasetKind::VehicleCodes => 2,
        }
    }

    pub fn output_file(self) -> String {
        join!(self.file_stem(), ".json")
    }

    pub fn input_file(self) -> String {
        join!(self.file_stem(), ".html")
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    /// Accepts the CLI name or the file stem (`driving-sides` / `driving_sides`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        DatasetKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| format!("Unknown dataset: {s}"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetSelector {
    All,
    Some(Vec<DatasetKind>),
}

impl DatasetSelector {
    /// Selected kinds in the order given, first mention kept on repeats.
    /// `All` is canonical order.
    pub fn kinds(&self) -> Vec<DatasetKind> {
        match self {
            DatasetSelector::All => DatasetKind::ALL.to_vec(),
            DatasetSelector::Some(list) => {
                let mut v = Vec::with_capacity(list.len());
                for &k in list {
                    if !v.contains(&k) {
                        v.push(k);
                    }
                }
                v
            }
        }
    }
}

/// Where source documents come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// HTTP with the on-disk cache; `refresh` skips cached copies.
    Fetch { refresh: bool },
    /// Read `<stem>.html` from a local directory.
    Dir(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub datasets: DatasetSelector,
    pub source: Source,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            datasets: DatasetSelector::All,
            source: Source::Fetch { refresh: false },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    /// Carry curated fields over from the previously written file.
    pub merge_previous: bool,
    /// Extract and report only.
    pub dry_run: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            merge_previous: true,
            dry_run: false,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self, kind: DatasetKind) -> PathBuf {
        self.out_dir.join(kind.output_file())
    }
}
