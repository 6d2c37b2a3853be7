use std::sync::Arc;

use clap::ArgMatches;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use tunewatch_core::{
    HttpCatalogueSource, ShutdownSummary, TunewatchError, WatchService, WatchSettings,
};

use super::helpers::{load_config, runtime};
use crate::discord;
use crate::shutdown::wait_for_shutdown_signal;

pub(crate) fn handle_run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(matches)?;

    let token = match config.require_token() {
        Ok(token) => token.to_string(),
        Err(e) => {
            eprintln!(
                "Error: {}\nTip: Set {} or add a [discord] token to the config file.",
                e,
                tunewatch_config::TOKEN_ENV
            );
            error!(event = "cli.run_failed", error = %e, error_code = e.error_code());
            return Err(e.into());
        }
    };

    let settings = WatchSettings::from_config(&config);
    let source =
        HttpCatalogueSource::new(config.catalogue.url(), config.catalogue.fetch_timeout())?;

    info!(
        event = "cli.run_started",
        catalogue_url = source.url(),
        data_dir = %settings.data_dir.display(),
        scan_interval_secs = settings.scan.interval.as_secs(),
        refresh_interval_secs = settings.refresh_interval.as_secs()
    );

    let rt = runtime()?;
    match rt.block_on(watch(token, settings, source)) {
        Ok(Some(summary)) => {
            println!(
                "Stopped. {} incidents reported, {} artists detected.",
                summary.incidents, summary.artists
            );
            info!(
                event = "cli.run_completed",
                incidents = summary.incidents,
                artists = summary.artists
            );
            Ok(())
        }
        Ok(None) => {
            info!(event = "cli.run_completed", connected = false);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            error!(event = "cli.run_failed", error = %e);
            Err(e)
        }
    }
}

/// Connect, run the watch service until a signal arrives, then disconnect.
///
/// Returns `None` when the signal arrives before the gateway is ready.
async fn watch(
    token: String,
    settings: WatchSettings,
    source: HttpCatalogueSource,
) -> Result<Option<ShutdownSummary>, Box<dyn std::error::Error>> {
    let cancel = CancellationToken::new();
    tokio::spawn(wait_for_shutdown_signal(cancel.clone()));

    let Some(session) = discord::connect(&token, &cancel).await? else {
        return Ok(None);
    };

    let platform = session.platform();
    let service = WatchService::new(
        settings,
        source,
        platform.clone(),
        platform.clone(),
        Arc::new(platform),
    );

    let result = service.run(cancel.clone()).await;
    session.shutdown().await;

    Ok(Some(result?))
}
