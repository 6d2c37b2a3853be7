use std::path::PathBuf;

use clap::ArgMatches;
use tracing::error;

use tunewatch_core::{TunewatchConfig, TunewatchError};

/// Load configuration for a command. Loading already validates it.
///
/// A broken config file is never replaced by defaults; the command fails
/// with the parse error instead.
pub(crate) fn load_config(
    matches: &ArgMatches,
) -> Result<TunewatchConfig, Box<dyn std::error::Error>> {
    let explicit = matches.get_one::<PathBuf>("config");

    match TunewatchConfig::load_hierarchy(explicit.map(PathBuf::as_path)) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!("Error: Could not load config: {}", e);
            if explicit.is_none() {
                eprintln!("Tip: Check ~/.tunewatch/config.toml for syntax errors.");
            }
            error!(
                event = "cli.config.load_failed",
                error = %e,
                error_code = e.error_code(),
            );
            Err(e.into())
        }
    }
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            error!(event = "cli.runtime.build_failed", error = %e);
            eprintln!("Error: Could not start async runtime: {}", e);
            e.into()
        })
}
