//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.tunewatch/config.toml`
//! 3. **Explicit config** - the file passed with `--config`
//! 4. **Environment** - `TUNEWATCH_DISCORD_TOKEN`, `TUNEWATCH_DATA_DIR`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use tunewatch_paths::TunewatchPaths;

use crate::errors::ConfigError;
use crate::types::{CatalogueConfig, DiscordConfig, ScanConfig, StorageConfig, TunewatchConfig};
use crate::validation::validate_config;

/// Overrides `[discord] token`.
pub const TOKEN_ENV: &str = "TUNEWATCH_DISCORD_TOKEN";

/// Overrides `[storage] data_dir`.
pub const DATA_DIR_ENV: &str = "TUNEWATCH_DATA_DIR";

/// Load configuration from the hierarchy of config sources.
///
/// A missing user config is not an error. A missing explicit config is,
/// since the caller asked for that file by name.
///
/// # Errors
///
/// Returns an error if a present file cannot be read or parsed, or if the
/// merged configuration fails validation.
pub fn load_hierarchy(explicit: Option<&Path>) -> Result<TunewatchConfig, ConfigError> {
    let user_config = match TunewatchPaths::resolve() {
        Ok(paths) => Some(paths.user_config()),
        Err(e) => {
            debug!(
                event = "config.loading.user_config_unavailable",
                error = %e,
            );
            None
        }
    };

    load_from(user_config.as_deref(), explicit)
}

/// Same as [`load_hierarchy`] with an explicit user config location.
fn load_from(
    user_config: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<TunewatchConfig, ConfigError> {
    let mut config = TunewatchConfig::default();

    if let Some(path) = user_config {
        match load_config_file(path) {
            Ok(user) => config = merge_configs(config, user),
            Err(ConfigError::IoError { source })
                if source.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }

    if let Some(path) = explicit {
        config = merge_configs(config, load_config_file(path)?);
    }

    apply_env_overrides(&mut config);

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
fn load_config_file(path: &Path) -> Result<TunewatchConfig, ConfigError> {
    let content = fs::read_to_string(path)
        .map_err(|e| std::io::Error::new(e.kind(), format!("'{}': {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("'{}': {}", path.display(), e),
    })
}

fn apply_env_overrides(config: &mut TunewatchConfig) {
    if let Ok(token) = std::env::var(TOKEN_ENV)
        && !token.trim().is_empty()
    {
        config.discord.token = Some(token);
    }

    if let Ok(dir) = std::env::var(DATA_DIR_ENV)
        && !dir.trim().is_empty()
    {
        config.storage.data_dir = Some(PathBuf::from(dir));
    }
}

/// Merge two configurations, with override_config taking precedence.
///
/// Each field of the override replaces the base value only if present.
pub fn merge_configs(base: TunewatchConfig, override_config: TunewatchConfig) -> TunewatchConfig {
    TunewatchConfig {
        catalogue: CatalogueConfig {
            url: override_config.catalogue.url.or(base.catalogue.url),
            report_url_template: override_config
                .catalogue
                .report_url_template
                .or(base.catalogue.report_url_template),
            refresh_interval_secs: override_config
                .catalogue
                .refresh_interval_secs
                .or(base.catalogue.refresh_interval_secs),
            fetch_timeout_secs: override_config
                .catalogue
                .fetch_timeout_secs
                .or(base.catalogue.fetch_timeout_secs),
        },
        scan: ScanConfig {
            interval_secs: override_config.scan.interval_secs.or(base.scan.interval_secs),
            notify_timeout_secs: override_config
                .scan
                .notify_timeout_secs
                .or(base.scan.notify_timeout_secs),
            activity_label: override_config
                .scan
                .activity_label
                .or(base.scan.activity_label),
        },
        storage: StorageConfig {
            data_dir: override_config.storage.data_dir.or(base.storage.data_dir),
        },
        discord: DiscordConfig {
            token: override_config.discord.token.or(base.discord.token),
        },
    }
}
