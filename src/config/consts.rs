// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = concat!("geo_scrape/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Sources
pub const CCTLDS_URL: &str = "https://en.wikipedia.org/wiki/Country_code_top-level_domain";
pub const DRIVING_SIDES_URL: &str = "https://en.wikipedia.org/wiki/Left-_and_right-hand_traffic";
pub const TELEPHONE_CODES_URL: &str = "https://en.wikipedia.org/wiki/List_of_country_calling_codes";
pub const VEHICLE_CODES_URL: &str = "https://en.wikipedia.org/wiki/International_vehicle_registration_code";

// Local cache
pub const CACHE_DIR: &str = ".store/cache";
pub const CACHE_MAX_AGE_SECS: u64 = 24 * 60 * 60;
pub const LOG_FILE: &str = ".store/debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_LANGUAGE: &str = "English";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
