//! The refresh scheduler: keeps the catalogue current on a long interval.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::catalogue::{CatalogueError, CatalogueHandle, CatalogueSource, CatalogueStore};
use crate::status::{StatusReporter, StatusSink};

pub struct Refresher<C, S> {
    store: CatalogueStore<C>,
    reporter: StatusReporter<S>,
    interval: Duration,
}

impl<C, S> Refresher<C, S>
where
    C: CatalogueSource,
    S: StatusSink,
{
    pub fn new(store: CatalogueStore<C>, reporter: StatusReporter<S>, interval: Duration) -> Self {
        Self {
            store,
            reporter,
            interval,
        }
    }

    pub fn catalogue(&self) -> CatalogueHandle {
        self.store.handle()
    }

    /// Refresh the catalogue, then publish the status summary whether or
    /// not the refresh succeeded. A failure keeps the previous catalogue.
    pub async fn refresh_once(&self) -> Result<usize, CatalogueError> {
        let result = self.store.refresh().await;
        self.reporter.publish();
        result
    }

    /// Refresh every interval until `cancel` fires. The first refresh
    /// happens one full interval after the call.
    pub async fn run(self, cancel: CancellationToken) {
        let mut timer = tokio::time::interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // Skip the first immediate tick.
        timer.tick().await;

        info!(
            event = "core.refresh.loop_started",
            interval_secs = self.interval.as_secs(),
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(event = "core.refresh.loop_stopped");
                    break;
                }
                _ = timer.tick() => {
                    info!(event = "core.refresh.tick_started");
                    // Failures are logged by the store; the loop carries on
                    let _ = self.refresh_once().await;
                }
            }
        }
    }
}
