//! Ledger persistence error types.

use std::path::PathBuf;

use crate::errors::TunewatchError;

/// Failure to write the ledger. Logged by callers; never stops a scheduler.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Failed to create data directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize artist stats: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

impl TunewatchError for LedgerError {
    fn error_code(&self) -> &'static str {
        match self {
            LedgerError::CreateDir { .. } => "LEDGER_CREATE_DIR_FAILED",
            LedgerError::WriteFailed { .. } => "LEDGER_WRITE_FAILED",
            LedgerError::Serialize { .. } => "LEDGER_SERIALIZE_FAILED",
        }
    }
}
