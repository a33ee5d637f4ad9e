//! Runtime configuration, read from the environment (and `.env` when present).

use crate::error::LipSyncError;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.newportai.com/api";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Bearer credential for the lip-sync API. May be empty and filled in from the form.
    pub api_key: String,
    /// Base URL the endpoint paths are appended to, without a trailing slash.
    pub api_base_url: String,
    pub poll_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, LipSyncError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, LipSyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("LIPSYNC_API_KEY")
            .map(|key| key.trim().to_string())
            .unwrap_or_default();

        let api_base_url = lookup("LIPSYNC_API_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        url::Url::parse(&api_base_url).map_err(|e| {
            LipSyncError::Config(format!("LIPSYNC_API_BASE_URL '{}': {}", api_base_url, e))
        })?;

        let poll_secs = match lookup("LIPSYNC_POLL_INTERVAL_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(LipSyncError::Config(format!(
                        "LIPSYNC_POLL_INTERVAL_SECS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => DEFAULT_POLL_INTERVAL_SECS,
        };

        Ok(Self {
            api_key,
            api_base_url,
            poll_interval: Duration::from_secs(poll_secs),
        })
    }
}
