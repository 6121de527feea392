//! Keep-alive job configuration.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::vars::{parse_url, Vars};

/// Target pinged when no URL is configured.
pub const DEFAULT_KEEP_ALIVE_URL: &str = "https://admin.thahrav.shop/api/keep-alive";

/// Ping period, matching a once-a-minute schedule.
pub const DEFAULT_KEEP_ALIVE_INTERVAL_SECS: u64 = 60;

/// Scheduled HTTP ping settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepAliveConfig {
    /// URLs to GET on every tick.
    pub urls: Vec<Url>,
    /// Time between ticks.
    pub interval: Duration,
}

impl KeepAliveConfig {
    /// Load from the process environment.
    ///
    /// Variables:
    /// - `KEEP_ALIVE_URLS` (comma-separated, default: the admin keep-alive endpoint)
    /// - `KEEP_ALIVE_INTERVAL_SECS` (default: 60, must be positive)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::load(&Vars::new(&lookup))
    }

    pub(crate) fn load(vars: &Vars<'_>) -> Result<Self, ConfigError> {
        let raw_urls = vars
            .list("KEEP_ALIVE_URLS")
            .unwrap_or_else(|| vec![DEFAULT_KEEP_ALIVE_URL.to_string()]);
        let urls = raw_urls
            .iter()
            .map(|raw| parse_url("KEEP_ALIVE_URLS", raw))
            .collect::<Result<Vec<_>, _>>()?;

        let secs = vars
            .parsed::<u64>("KEEP_ALIVE_INTERVAL_SECS")?
            .unwrap_or(DEFAULT_KEEP_ALIVE_INTERVAL_SECS);
        if secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "KEEP_ALIVE_INTERVAL_SECS".into(),
                message: "must be greater than zero".into(),
            });
        }

        Ok(Self {
            urls,
            interval: Duration::from_secs(secs),
        })
    }
}
