// src/log.rs
//
// Short logging macros over `tracing`. The binary installs the subscriber;
// library code only emits events.

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}

#[cfg(feature = "cli")]
pub use subscriber::init;

#[cfg(feature = "cli")]
mod subscriber {
    use std::fs::{self, OpenOptions};
    use std::path::Path;
    use std::sync::Mutex;

    use tracing_subscriber::EnvFilter;

    use crate::config::consts::LOG_FILE;

    /// Install the global subscriber. `RUST_LOG` overrides `verbosity`.
    /// Lines go to the debug log file; stderr if it can't be opened.
    pub fn init(verbosity: u8) {
        let level = match verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("geo_scrape={level}")));

        let builder = tracing_subscriber::fmt().with_env_filter(filter);

        match open_log_file(Path::new(LOG_FILE)) {
            Some(file) => {
                let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
            }
            None => {
                let _ = builder.with_writer(std::io::stderr).try_init();
            }
        }
    }

    fn open_log_file(path: &Path) -> Option<fs::File> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).ok()?;
            }
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    }
}
