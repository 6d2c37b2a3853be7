//! Configuration types as they appear in `config.toml`.
//!
//! Every field is optional on disk so that files can be layered; the accessor
//! methods resolve the built-in default when a value is absent.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tunewatch_paths::TunewatchPaths;

use crate::defaults::*;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunewatchConfig {
    #[serde(default)]
    pub catalogue: CatalogueConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub discord: DiscordConfig,
}

/// `[catalogue]`: where the watch-list lives and how often it is refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueConfig {
    pub url: Option<String>,
    pub report_url_template: Option<String>,
    pub refresh_interval_secs: Option<u64>,
    pub fetch_timeout_secs: Option<u64>,
}

impl CatalogueConfig {
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_CATALOGUE_URL)
    }

    pub fn report_url_template(&self) -> &str {
        self.report_url_template
            .as_deref()
            .unwrap_or(DEFAULT_REPORT_URL_TEMPLATE)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(
            self.refresh_interval_secs
                .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS),
        )
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS))
    }
}

/// `[scan]`: presence polling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub interval_secs: Option<u64>,
    pub notify_timeout_secs: Option<u64>,
    pub activity_label: Option<String>,
}

impl ScanConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.unwrap_or(DEFAULT_SCAN_INTERVAL_SECS))
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(
            self.notify_timeout_secs
                .unwrap_or(DEFAULT_NOTIFY_TIMEOUT_SECS),
        )
    }

    pub fn activity_label(&self) -> &str {
        self.activity_label
            .as_deref()
            .unwrap_or(DEFAULT_ACTIVITY_LABEL)
    }
}

/// `[storage]`: location of persisted counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured data directory, falling back to `~/.tunewatch/data`
    /// (or `/tmp/.tunewatch/data` when no home directory exists).
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        TunewatchPaths::resolve()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    event = "config.storage.data_dir_fallback",
                    error = %e,
                    fallback = "/tmp/.tunewatch",
                );
                TunewatchPaths::from_dir(PathBuf::from("/tmp/.tunewatch"))
            })
            .data_dir()
    }
}

/// `[discord]`: bot credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub token: Option<String>,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
