//! Configuration validation logic.

use crate::errors::ConfigError;
use crate::types::TunewatchConfig;

/// Validate a TunewatchConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - Intervals and timeouts must be greater than zero
/// - The catalogue URL must be http(s)
/// - The report URL template must contain exactly one `{}` placeholder
/// - The activity label must not be empty
///
/// The Discord token is not checked here; only commands that log in need it
/// (see [`TunewatchConfig::require_token`]).
pub fn validate_config(config: &TunewatchConfig) -> Result<(), ConfigError> {
    let positive = [
        ("catalogue.refresh_interval_secs", config.catalogue.refresh_interval_secs),
        ("catalogue.fetch_timeout_secs", config.catalogue.fetch_timeout_secs),
        ("scan.interval_secs", config.scan.interval_secs),
        ("scan.notify_timeout_secs", config.scan.notify_timeout_secs),
    ];
    for (name, value) in positive {
        if value == Some(0) {
            return Err(invalid(format!("{} must be > 0", name)));
        }
    }

    let url = config.catalogue.url();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(invalid(format!(
            "catalogue.url must be an http(s) URL, got '{}'",
            url
        )));
    }

    let template = config.catalogue.report_url_template();
    if template.matches("{}").count() != 1 {
        return Err(invalid(format!(
            "catalogue.report_url_template must contain exactly one '{{}}', got '{}'",
            template
        )));
    }

    if config.scan.activity_label().trim().is_empty() {
        return Err(invalid("scan.activity_label must not be empty".to_string()));
    }

    Ok(())
}

fn invalid(message: String) -> ConfigError {
    ConfigError::InvalidConfiguration { message }
}
