//! Catalogue fetch error types.

use std::time::Duration;

use crate::errors::TunewatchError;

/// Any failure to obtain a fresh catalogue. Never fatal: the previous
/// catalogue stays in force.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("Catalogue request failed: {message}")]
    Http { message: String },

    #[error("Catalogue request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("Catalogue source returned HTTP {status}")]
    Status { status: u16 },

    #[error("Catalogue is not a valid entry list: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

impl TunewatchError for CatalogueError {
    fn error_code(&self) -> &'static str {
        match self {
            CatalogueError::Http { .. } => "CATALOGUE_HTTP_FAILED",
            CatalogueError::Timeout { .. } => "CATALOGUE_TIMEOUT",
            CatalogueError::Status { .. } => "CATALOGUE_BAD_STATUS",
            CatalogueError::Parse { .. } => "CATALOGUE_PARSE_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error() {
        let error = CatalogueError::Status { status: 503 };
        assert_eq!(error.to_string(), "Catalogue source returned HTTP 503");
        assert_eq!(error.error_code(), "CATALOGUE_BAD_STATUS");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_parse_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let error: CatalogueError = json_err.into();
        assert_eq!(error.error_code(), "CATALOGUE_PARSE_FAILED");
    }

    #[test]
    fn test_timeout_error() {
        let error = CatalogueError::Timeout {
            after: Duration::from_secs(30),
        };
        assert_eq!(error.to_string(), "Catalogue request timed out after 30s");
        assert_eq!(error.error_code(), "CATALOGUE_TIMEOUT");
    }
}
