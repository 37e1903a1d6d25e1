// src/store.rs
//! Fields that live in the output files but not on the source pages.
//!
//! Only ccTLD `language` is like that: it is curated by hand in a previous
//! `cctlds.json` and carried over on every rebuild.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::config::consts::DEFAULT_LANGUAGE;
use crate::core::sanitize::title_case;
use crate::error::ScrapeError;
use crate::record::Record;

#[derive(Deserialize)]
struct PersistedCctld {
    code: String,
    #[serde(default)]
    language: Option<String>,
}

/// `code → language` from a previously written ccTLD file.
/// A missing file is an empty map.
pub fn load_languages(path: &Path) -> Result<HashMap<String, String>, ScrapeError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let text = fs::read_to_string(path)?;
    let items: Vec<PersistedCctld> = serde_json::from_str(&text)?;
    Ok(items
        .into_iter()
        .filter_map(|it| {
            let lang = it.language?;
            let lang = lang.trim();
            (!lang.is_empty()).then(|| (it.code, s!(lang)))
        })
        .collect())
}

/// New records with each ccTLD's language taken from `languages`
/// (title-cased), `English` when unknown. Other records pass through.
pub fn apply_languages(records: Vec<Record>, languages: &HashMap<String, String>) -> Vec<Record> {
    records
        .into_iter()
        .map(|rec| match rec {
            Record::Cctld(mut r) => {
                let lang = languages.get(&r.code).map(String::as_str).unwrap_or(DEFAULT_LANGUAGE);
                r.language = title_case(lang);
                Record::Cctld(r)
            }
            other => other,
        })
        .collect()
}
