// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod record;
pub mod specs;

pub mod file;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod store;

pub use config::options::DatasetKind;
pub use engine::{extract, Assembly};
pub use error::{ExtractError, ScrapeError};
pub use record::Record;
