//! Watch service lifecycle.
//!
//! Startup: load the ledger, refresh the catalogue once, publish the
//! status line, start both schedulers. Shutdown: stop both schedulers and
//! persist the ledger exactly once.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tunewatch_config::TunewatchConfig;

use crate::catalogue::{CatalogueSource, CatalogueStore};
use crate::ledger::{LedgerError, LedgerStore};
use crate::notify::Notifier;
use crate::presence::PresenceSource;
use crate::refresh::Refresher;
use crate::scan::{ScanSettings, Scanner};
use crate::status::{StatusReporter, StatusSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSettings {
    pub data_dir: PathBuf,
    pub refresh_interval: Duration,
    pub scan: ScanSettings,
}

impl WatchSettings {
    pub fn from_config(config: &TunewatchConfig) -> Self {
        Self {
            data_dir: config.storage.data_dir(),
            refresh_interval: config.catalogue.refresh_interval(),
            scan: ScanSettings::from_config(config),
        }
    }
}

/// Totals at the moment the service stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownSummary {
    pub incidents: u64,
    pub artists: usize,
}

pub struct WatchService<C, P, N, S> {
    settings: WatchSettings,
    source: C,
    presence: P,
    notifier: N,
    sink: Arc<S>,
}

impl<C, P, N, S> WatchService<C, P, N, S>
where
    C: CatalogueSource,
    P: PresenceSource,
    N: Notifier,
    S: StatusSink,
{
    pub fn new(settings: WatchSettings, source: C, presence: P, notifier: N, sink: Arc<S>) -> Self {
        Self {
            settings,
            source,
            presence,
            notifier,
            sink,
        }
    }

    /// Run until `cancel` fires.
    ///
    /// Only the final persist can fail this call; everything upstream is
    /// logged and retried on the next tick.
    pub async fn run(self, cancel: CancellationToken) -> Result<ShutdownSummary, LedgerError> {
        let WatchService {
            settings,
            source,
            presence,
            notifier,
            sink,
        } = self;

        let store = LedgerStore::new(settings.data_dir.clone());
        let ledger = store.load();

        info!(
            event = "core.service.start_started",
            data_dir = %settings.data_dir.display(),
            incidents = ledger.incident_count(),
            artists = ledger.artists().len(),
        );

        let catalogue = CatalogueStore::new(source);
        let reporter = StatusReporter::new(sink, catalogue.handle(), ledger.incident_counter());
        let refresher = Refresher::new(catalogue, reporter.clone(), settings.refresh_interval);

        // An unreachable source leaves the service running on an empty
        // catalogue until the next refresh
        let _ = refresher.refresh_once().await;

        let mut scanner = Scanner::new(
            presence,
            notifier,
            refresher.catalogue(),
            reporter,
            ledger,
            store,
            settings.scan,
        );

        let refresh_task = tokio::spawn(refresher.run(cancel.clone()));

        info!(event = "core.service.start_completed");

        scanner.run(cancel.clone()).await;

        // The scan loop only returns on cancellation; make sure the refresh
        // loop sees it too before waiting on it.
        cancel.cancel();
        if let Err(e) = refresh_task.await {
            warn!(event = "core.service.refresh_task_failed", error = %e);
        }

        let summary = ShutdownSummary {
            incidents: scanner.ledger().incident_count(),
            artists: scanner.ledger().artists().len(),
        };
        scanner.finish()?;

        info!(
            event = "core.service.shutdown_completed",
            incidents = summary.incidents,
            artists = summary.artists,
        );

        Ok(summary)
    }
}
