use std::error::Error;

/// Base trait for all tunewatch errors
pub trait TunewatchError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

impl TunewatchError for tunewatch_config::ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            tunewatch_config::ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            tunewatch_config::ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            tunewatch_config::ConfigError::MissingToken => "MISSING_TOKEN",
            tunewatch_config::ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, tunewatch_config::ConfigError::IoError { .. })
    }
}
