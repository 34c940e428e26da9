use std::time::Duration;
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products/";
const DEFAULT_TOAST_MS: u64 = 2000;
const DEFAULT_BUFFER_SIZE: usize = 32;
/// Upper bound for `VIEW_BUFFER_SIZE`; channel capacity is allocated up front.
pub const MAX_BUFFER_SIZE: usize = 65_536;

/// Runtime settings for the product grid, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub catalog_url: String,
    /// `None` means the fetch may wait forever.
    pub catalog_timeout: Option<Duration>,
    /// When false a failed fetch leaves the grid on its skeleton.
    pub surface_fetch_errors: bool,
    pub toast_duration: Duration,
    pub buffer_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_timeout: None,
            surface_fetch_errors: false,
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MS),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ViewConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let catalog_url = lookup("CATALOG_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.catalog_url);

        let catalog_timeout = match lookup("CATALOG_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_number("CATALOG_TIMEOUT_SECS", &raw)?)),
            None => None,
        };

        let surface_fetch_errors = match lookup("SURFACE_FETCH_ERRORS") {
            Some(raw) => parse_flag("SURFACE_FETCH_ERRORS", &raw)?,
            None => defaults.surface_fetch_errors,
        };

        let toast_duration = match lookup("TOAST_DURATION_MS") {
            Some(raw) => Duration::from_millis(parse_number("TOAST_DURATION_MS", &raw)?),
            None => defaults.toast_duration,
        };

        let buffer_size = match lookup("VIEW_BUFFER_SIZE") {
            Some(raw) => parse_buffer_size("VIEW_BUFFER_SIZE", &raw)?,
            None => defaults.buffer_size,
        };

        Ok(Self {
            catalog_url,
            catalog_timeout,
            surface_fetch_errors,
            toast_duration,
            buffer_size,
        })
    }
}

fn parse_number(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value: raw.to_string() })
}

fn parse_buffer_size(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match usize::try_from(parse_number(key, raw)?) {
        Ok(n) if (1..=MAX_BUFFER_SIZE).contains(&n) => Ok(n),
        _ => Err(ConfigError::Invalid { key, value: raw.to_string() }),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: raw.to_string() }),
    }
}
