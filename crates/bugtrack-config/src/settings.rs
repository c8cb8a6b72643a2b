//! Application settings
//!
//! Loaded from `.bugtrack.toml` (or the global config file), then overridden
//! by `BUGTRACK_*` environment variables. A `.env` file is honoured.

use crate::error::ConfigError;
use crate::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ENV_BASE_URL: &str = "BUGTRACK_BASE_URL";
const ENV_STALE_AFTER_MINUTES: &str = "BUGTRACK_STALE_AFTER_MINUTES";

/// Settings shared by the store, the transport and the CLI
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base address every API path is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// A loaded bug list younger than this is not fetched again
    #[serde(default = "default_stale_after_minutes")]
    pub stale_after_minutes: u64,

    /// Timeout applied to every HTTP request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Nested dispatches deeper than this are dropped
    #[serde(default = "default_max_dispatch_depth")]
    pub max_dispatch_depth: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_stale_after_minutes() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_dispatch_depth() -> usize {
    64
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stale_after_minutes: default_stale_after_minutes(),
            request_timeout_secs: default_request_timeout_secs(),
            max_dispatch_depth: default_max_dispatch_depth(),
        }
    }
}

impl Settings {
    /// Load config from file and environment, or use defaults
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
            Err(_) => log::debug!(".env file not found, relying on environment variables"),
        }

        let mut settings = match crate::load_config_file() {
            Some((path, content)) => match Self::from_toml(&content) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            None => {
                log::debug!("Using default settings");
                Self::default()
            }
        };

        if let Err(e) = settings.apply_env(|var| std::env::var(var).ok()) {
            log::warn!("Ignoring environment override: {}", e);
        }
        settings
    }

    /// Parse settings from TOML, defaulting every missing field
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `BUGTRACK_*` overrides read through `lookup`
    ///
    /// Valid overrides are applied even when a later one is rejected.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = base_url;
        }
        if let Some(value) = lookup(ENV_STALE_AFTER_MINUTES) {
            let parsed = value.trim().parse::<u64>();
            self.stale_after_minutes = parsed.map_err(|_| ConfigError::InvalidEnv {
                var: ENV_STALE_AFTER_MINUTES,
                value,
            })?;
        }
        Ok(())
    }

    /// Staleness window for cached list loads
    ///
    /// Saturates for absurdly large values, which then mean "never stale".
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_minutes.saturating_mul(60))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
