//! # tunewatch-config
//!
//! TOML configuration types, loading, and validation for tunewatch.
//!
//! Single source of truth for `TunewatchConfig` and its sections.
//! Depends only on `tunewatch-paths`.

mod defaults;
mod loading;
mod validation;

pub mod errors;
pub mod types;

pub use defaults::{
    DEFAULT_ACTIVITY_LABEL, DEFAULT_CATALOGUE_URL, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_NOTIFY_TIMEOUT_SECS, DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_REPORT_URL_TEMPLATE,
    DEFAULT_SCAN_INTERVAL_SECS,
};
pub use errors::ConfigError;
pub use loading::{DATA_DIR_ENV, TOKEN_ENV, load_hierarchy, merge_configs};
pub use types::{CatalogueConfig, DiscordConfig, ScanConfig, StorageConfig, TunewatchConfig};
pub use validation::validate_config;

impl TunewatchConfig {
    /// Load configuration from defaults, the user config, an optional explicit
    /// file and the environment.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy(explicit: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        loading::load_hierarchy(explicit)
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    /// The Discord bot token, or `ConfigError::MissingToken` when none is configured.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.discord
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)
    }
}
