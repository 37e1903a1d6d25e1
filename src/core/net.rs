// src/core/net.rs
//! HTTPS GET with an on-disk page cache.
//!
//! Cache files live under [`CACHE_DIR`] as `<slug of url>.html` and are reused
//! while younger than [`CACHE_MAX_AGE_SECS`]. A failed cache write is logged
//! and otherwise ignored.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use crate::config::consts::{CACHE_DIR, CACHE_MAX_AGE_SECS, HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::core::sanitize::slugify;
use crate::error::ScrapeError;

/// Fetch `url` through the default cache directory.
pub fn fetch(url: &str, refresh: bool) -> Result<String, ScrapeError> {
    fetch_cached(url, Path::new(CACHE_DIR), refresh)
}

/// Fetch `url`, serving a fresh copy from `cache_dir` unless `refresh`.
pub fn fetch_cached(url: &str, cache_dir: &Path, refresh: bool) -> Result<String, ScrapeError> {
    let path = cache_path(cache_dir, url);
    let max_age = Duration::from_secs(CACHE_MAX_AGE_SECS);

    if !refresh {
        if let Some(body) = read_fresh(&path, max_age) {
            logd!("cache hit {}", path.display());
            return Ok(body);
        }
    }

    logf!("GET {url}");
    let body = http_get(url)?;

    if let Err(e) = write_cache(&path, &body) {
        logw!("cache write failed for {}: {e}", path.display());
    }
    Ok(body)
}

pub fn http_get(url: &str) -> Result<String, reqwest::Error> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?;
    client.get(url).send()?.error_for_status()?.text()
}

pub fn cache_path(cache_dir: &Path, url: &str) -> PathBuf {
    cache_dir.join(join!(slugify(url), ".html"))
}

/// Contents of `path` if it exists and was modified within `max_age`.
pub fn read_fresh(path: &Path, max_age: Duration) -> Option<String> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    // mtime in the future counts as fresh
    let age = SystemTime::now().duration_since(modified).unwrap_or_default();
    if age > max_age {
        return None;
    }
    fs::read_to_string(path).ok()
}

fn write_cache(path: &Path, body: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)
}
