//! The scan scheduler.
//!
//! Every tick takes one presence snapshot and one catalogue snapshot, then
//! for each listener of a watch-listed artist: counts the detection, and
//! unless the listener is still in an already-notified episode, sends a
//! notification. Ticks run one after another on a single task, so the dedup
//! tracker and the ledger never see concurrent mutation.

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tunewatch_config::TunewatchConfig;

use crate::catalogue::{CatalogueEntry, CatalogueHandle};
use crate::dedup::DedupTracker;
use crate::errors::TunewatchError;
use crate::ledger::{LedgerError, LedgerStore, StatsLedger};
use crate::notify::{DeliveryError, Notification, Notifier, deliver, format_report_url};
use crate::presence::{PresenceRecord, PresenceSource};
use crate::status::{StatusReporter, StatusSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    pub interval: Duration,
    /// Upper bound for a single notification attempt.
    pub notify_timeout: Duration,
    /// Only listening activities from this source are matched.
    pub activity_label: String,
    pub report_url_template: String,
}

impl ScanSettings {
    pub fn from_config(config: &TunewatchConfig) -> Self {
        Self {
            interval: config.scan.interval(),
            notify_timeout: config.scan.notify_timeout(),
            activity_label: config.scan.activity_label().to_string(),
            report_url_template: config.catalogue.report_url_template().to_string(),
        }
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Distinct subjects listening on the configured source.
    pub listeners: usize,
    /// Listeners whose artist is in the catalogue (each counted as a detection).
    pub matches: usize,
    /// Matches that did not notify because the episode was already reported.
    pub suppressed: usize,
    /// Notification attempts, delivered or not.
    pub new_incidents: u64,
    pub delivery_failures: usize,
}

pub struct Scanner<P, N, S> {
    presence: P,
    notifier: N,
    catalogue: CatalogueHandle,
    reporter: StatusReporter<S>,
    dedup: DedupTracker,
    ledger: StatsLedger,
    store: LedgerStore,
    settings: ScanSettings,
    /// Set once the final persist has been attempted.
    finalized: bool,
}

impl<P, N, S> Scanner<P, N, S>
where
    P: PresenceSource,
    N: Notifier,
    S: StatusSink,
{
    pub fn new(
        presence: P,
        notifier: N,
        catalogue: CatalogueHandle,
        reporter: StatusReporter<S>,
        ledger: StatsLedger,
        store: LedgerStore,
        settings: ScanSettings,
    ) -> Self {
        Self {
            presence,
            notifier,
            catalogue,
            reporter,
            dedup: DedupTracker::new(),
            ledger,
            store,
            settings,
            finalized: false,
        }
    }

    pub fn ledger(&self) -> &StatsLedger {
        &self.ledger
    }

    pub fn dedup(&self) -> &DedupTracker {
        &self.dedup
    }

    /// Run one scan.
    pub async fn tick(&mut self) -> TickOutcome {
        let catalogue = self.catalogue.snapshot();
        let records = self.presence.snapshot();

        let mut outcome = TickOutcome::default();
        // A subject seen through several guilds is processed once per tick
        let mut seen = HashSet::new();

        for record in records {
            if !record.is_listening_to(&self.settings.activity_label) {
                continue;
            }
            if !seen.insert(record.subject_id) {
                continue;
            }
            outcome.listeners += 1;

            let Some(entry) = catalogue.lookup(&record.matched_value) else {
                continue;
            };
            outcome.matches += 1;

            // Detections are counted whether or not a notification follows
            self.ledger.record_detection(&entry.name, Utc::now());

            if !self.dedup.should_notify(record.subject_id, &entry.name) {
                outcome.suppressed += 1;
                continue;
            }

            if self.notify(&record, &entry).await.is_err() {
                outcome.delivery_failures += 1;
            }
            self.dedup.mark_notified(record.subject_id, &entry.name);
            outcome.new_incidents += 1;
        }

        if outcome.new_incidents == 0 {
            return outcome;
        }

        let total = self.ledger.add_incidents(outcome.new_incidents);
        info!(
            event = "core.scan.incidents_reported",
            new_incidents = outcome.new_incidents,
            total_incidents = total,
        );

        if let Err(e) = self.persist() {
            error!(
                event = "core.scan.persist_failed",
                error = %e,
                error_code = e.error_code(),
            );
        }

        self.reporter.publish();

        outcome
    }

    async fn notify(
        &self,
        record: &PresenceRecord,
        entry: &CatalogueEntry,
    ) -> Result<(), DeliveryError> {
        let report_url = format_report_url(&self.settings.report_url_template, &entry.id);
        let notification = Notification::for_match(entry, &report_url);

        let result = deliver(
            &self.notifier,
            record.subject_id,
            &notification,
            self.settings.notify_timeout,
        )
        .await;

        match &result {
            Ok(()) => {
                info!(
                    event = "core.scan.notification_sent",
                    subject_id = %record.subject_id,
                    artist = %entry.name,
                );
            }
            Err(e) if e.is_user_error() => {
                info!(
                    event = "core.scan.notification_failed",
                    subject_id = %record.subject_id,
                    display_name = %record.display_name,
                    report_url = %report_url,
                    error = %e,
                );
            }
            Err(e) => {
                warn!(
                    event = "core.scan.notification_failed",
                    subject_id = %record.subject_id,
                    display_name = %record.display_name,
                    report_url = %report_url,
                    error = %e,
                    error_code = e.error_code(),
                );
            }
        }

        result
    }

    /// Tick on the configured interval until `cancel` fires.
    ///
    /// The first tick runs immediately. A tick that overruns the interval
    /// causes the missed ticks to be skipped, never run concurrently.
    pub async fn run(&mut self, cancel: CancellationToken) {
        let mut timer = tokio::time::interval(self.settings.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            event = "core.scan.loop_started",
            interval_secs = self.settings.interval.as_secs(),
            activity_label = %self.settings.activity_label,
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(event = "core.scan.loop_stopped");
                    break;
                }
                _ = timer.tick() => {
                    let outcome = self.tick().await;
                    debug!(
                        event = "core.scan.tick_completed",
                        listeners = outcome.listeners,
                        matches = outcome.matches,
                        suppressed = outcome.suppressed,
                        new_incidents = outcome.new_incidents,
                        delivery_failures = outcome.delivery_failures,
                    );
                }
            }
        }
    }

    /// Final persist. After this the scanner no longer writes on drop.
    pub fn finish(mut self) -> Result<(), LedgerError> {
        self.finalized = true;
        let result = self.persist();
        match &result {
            Ok(()) => info!(
                event = "core.scan.final_persist_completed",
                incidents = self.ledger.incident_count(),
                artists = self.ledger.artists().len(),
            ),
            Err(e) => error!(
                event = "core.scan.final_persist_failed",
                error = %e,
            ),
        }
        result
    }
}

impl<P, N, S> Scanner<P, N, S> {
    pub fn persist(&self) -> Result<(), LedgerError> {
        self.store.persist(&self.ledger)
    }
}

/// Covers exit paths that never reach [`Scanner::finish`], such as a panic
/// unwinding through the service.
impl<P, N, S> Drop for Scanner<P, N, S> {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        warn!(
            event = "core.scan.persist_on_drop",
            "Scanner dropped without finish - persisting ledger"
        );
        if let Err(e) = self.persist() {
            error!(event = "core.scan.persist_on_drop_failed", error = %e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::catalogue::CatalogueStore;
    use crate::presence::{ActivityKind, SubjectId};
    use crate::test_support::{
        DeliveryMode, FakePresence, JsonSource, RecordingNotifier, RecordingSink, listening,
    };

    const CATALOGUE: &str = r#"[
        {"name": "ArtistX", "id": "id123"},
        {"name": "ArtistY", "id": "id456"}
    ]"#;

    // Field order matters: the scanner persists on drop, so it must go
    // before the temp dir is removed.
    struct Harness {
        scanner: Scanner<FakePresence, RecordingNotifier, RecordingSink>,
        catalogue: CatalogueStore<JsonSource>,
        source: JsonSource,
        presence: FakePresence,
        notifier: RecordingNotifier,
        sink: Arc<RecordingSink>,
        dir: tempfile::TempDir,
    }

    impl Harness {
        async fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let source = JsonSource::new(CATALOGUE);
            let catalogue = CatalogueStore::new(source.clone());
            catalogue.refresh().await.unwrap();

            let presence = FakePresence::default();
            let notifier = RecordingNotifier::default();
            let sink = Arc::new(RecordingSink::default());

            let store = LedgerStore::new(dir.path().join("data"));
            let ledger = store.load();
            let reporter = StatusReporter::new(
                Arc::clone(&sink),
                catalogue.handle(),
                ledger.incident_counter(),
            );

            let scanner = Scanner::new(
                presence.clone(),
                notifier.clone(),
                catalogue.handle(),
                reporter,
                ledger,
                store,
                ScanSettings {
                    interval: Duration::from_secs(10),
                    notify_timeout: Duration::from_secs(5),
                    activity_label: "Spotify".to_string(),
                    report_url_template: "https://souloverai.com/artist/{}".to_string(),
                },
            );

            Self {
                scanner,
                catalogue,
                source,
                presence,
                notifier,
                sink,
                dir,
            }
        }

        fn data_dir(&self) -> std::path::PathBuf {
            self.dir.path().join("data")
        }

        fn total_detects(&self, name: &str) -> u64 {
            self.scanner
                .ledger()
                .artist(name)
                .map(|s| s.total_detects)
                .unwrap_or(0)
        }
    }

    #[tokio::test]
    async fn test_first_match_notifies_counts_and_persists() {
        let mut h = Harness::new().await;
        h.presence.set(vec![listening(42, "ArtistX")]);

        let outcome = h.scanner.tick().await;

        assert_eq!(outcome.matches, 1);
        assert_eq!(outcome.new_incidents, 1);

        let attempts = h.notifier.attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].0, SubjectId(42));
        assert_eq!(
            attempts[0].1.report_url,
            "https://souloverai.com/artist/id123"
        );

        assert_eq!(h.total_detects("ArtistX"), 1);
        assert_eq!(h.scanner.ledger().incident_count(), 1);
        assert!(!h.scanner.dedup().should_notify(SubjectId(42), "ArtistX"));

        let persisted = LedgerStore::new(h.data_dir()).load();
        assert_eq!(persisted.incident_count(), 1);
        assert_eq!(persisted.artist("ArtistX").unwrap().total_detects, 1);

        let updates = h.sink.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(
            updates[0].text,
            "Reported 1 incidents. 2 AI accounts in database"
        );
    }

    #[tokio::test]
    async fn test_repeat_match_is_counted_but_not_renotified() {
        let mut h = Harness::new().await;
        h.presence.set(vec![listening(42, "ArtistX")]);

        h.scanner.tick().await;
        let second = h.scanner.tick().await;

        assert_eq!(second.matches, 1);
        assert_eq!(second.suppressed, 1);
        assert_eq!(second.new_incidents, 0);
        assert_eq!(h.total_detects("ArtistX"), 2);
        assert_eq!(h.notifier.attempts().len(), 1);
        assert_eq!(h.scanner.ledger().incident_count(), 1);
        // A quiet tick does not touch the status line
        assert_eq!(h.sink.updates().len(), 1);
    }

    #[tokio::test]
    async fn test_detections_independent_of_suppression() {
        let mut h = Harness::new().await;
        h.presence.set(vec![listening(42, "ArtistX")]);

        for _ in 0..5 {
            h.scanner.tick().await;
        }

        assert_eq!(h.total_detects("ArtistX"), 5);
        assert_eq!(h.notifier.attempts().len(), 1);
    }

    #[tokio::test]
    async fn test_changed_artist_starts_new_episode() {
        let mut h = Harness::new().await;

        h.presence.set(vec![listening(42, "ArtistX")]);
        h.scanner.tick().await;
        h.presence.set(vec![listening(42, "ArtistY")]);
        h.scanner.tick().await;
        h.presence.set(vec![listening(42, "ArtistX")]);
        h.scanner.tick().await;

        assert_eq!(h.notifier.attempts().len(), 3);
        assert_eq!(h.scanner.ledger().incident_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_delivery_is_counted_and_suppressed() {
        let mut h = Harness::new().await;
        h.notifier.set_mode(DeliveryMode::Reject);
        h.presence.set(vec![listening(42, "ArtistX")]);

        let first = h.scanner.tick().await;
        assert_eq!(first.new_incidents, 1);
        assert_eq!(first.delivery_failures, 1);
        assert_eq!(h.scanner.ledger().incident_count(), 1);

        let second = h.scanner.tick().await;
        assert_eq!(second.new_incidents, 0);
        // No retry on the next tick
        assert_eq!(h.notifier.attempts().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_delivery_times_out_and_counts() {
        let mut h = Harness::new().await;
        h.notifier.set_mode(DeliveryMode::Stall);
        h.presence.set(vec![listening(42, "ArtistX")]);

        let outcome = h.scanner.tick().await;

        assert_eq!(outcome.delivery_failures, 1);
        assert_eq!(outcome.new_incidents, 1);
        assert!(!h.scanner.dedup().should_notify(SubjectId(42), "ArtistX"));
    }

    #[tokio::test]
    async fn test_write_failure_does_not_stop_scanning() {
        let mut h = Harness::new().await;
        // A file where the data directory should be makes every persist fail
        std::fs::write(h.data_dir(), "not a directory").unwrap();

        h.presence.set(vec![listening(42, "ArtistX")]);
        let outcome = h.scanner.tick().await;

        assert_eq!(outcome.new_incidents, 1);
        assert_eq!(h.scanner.ledger().incident_count(), 1);
        assert_eq!(h.total_detects("ArtistX"), 1);
        assert_eq!(h.sink.updates().len(), 1);

        h.presence.set(vec![listening(42, "ArtistY")]);
        let outcome = h.scanner.tick().await;

        assert_eq!(outcome.new_incidents, 1);
        assert_eq!(h.scanner.ledger().incident_count(), 2);
        assert_eq!(h.notifier.attempts().len(), 2);
        assert!(h.data_dir().is_file());
    }

    #[tokio::test]
    async fn test_irrelevant_records_have_no_side_effects() {
        let mut h = Harness::new().await;
        let mut playing = listening(1, "ArtistX");
        playing.activity_kind = ActivityKind::Playing;
        let mut other_source = listening(2, "ArtistX");
        other_source.activity_label = "YouTube Music".to_string();
        let unknown = listening(3, "Real Band");
        let near_miss = listening(4, "artistx");

        h.presence.set(vec![playing, other_source, unknown, near_miss]);
        let outcome = h.scanner.tick().await;

        assert_eq!(outcome.listeners, 2);
        assert_eq!(outcome.matches, 0);
        assert!(h.notifier.attempts().is_empty());
        assert!(h.scanner.ledger().artists().is_empty());
        assert!(h.sink.updates().is_empty());
        assert!(!h.data_dir().exists());
    }

    #[tokio::test]
    async fn test_subject_in_several_guilds_is_processed_once() {
        let mut h = Harness::new().await;
        h.presence.set(vec![
            listening(42, "ArtistX"),
            listening(42, "ArtistX"),
            listening(7, "ArtistX"),
        ]);

        let outcome = h.scanner.tick().await;

        assert_eq!(outcome.listeners, 2);
        assert_eq!(outcome.new_incidents, 2);
        assert_eq!(h.total_detects("ArtistX"), 2);
        assert_eq!(h.notifier.attempts().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_matching_against_prior_catalogue() {
        let mut h = Harness::new().await;
        h.source.set_body("[{\"name\": \"ArtistX\"");

        assert!(h.catalogue.refresh().await.is_err());

        h.presence.set(vec![listening(42, "ArtistY")]);
        let outcome = h.scanner.tick().await;
        assert_eq!(outcome.new_incidents, 1);
        assert_eq!(h.total_detects("ArtistY"), 1);
    }

    #[tokio::test]
    async fn test_entries_dropped_by_refresh_stop_matching() {
        let mut h = Harness::new().await;
        h.source.set_body(r#"[{"name": "ArtistY", "id": "id456"}]"#);
        h.catalogue.refresh().await.unwrap();

        h.presence.set(vec![listening(42, "ArtistX")]);
        let outcome = h.scanner.tick().await;

        assert_eq!(outcome.matches, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ticks_until_cancelled() {
        let mut h = Harness::new().await;
        h.presence.set(vec![listening(42, "ArtistX")]);

        let cancel = CancellationToken::new();
        let stopper = cancel.clone();
        tokio::spawn(async move {
            // Ticks at 0s, 10s and 20s happen before this fires
            tokio::time::sleep(Duration::from_secs(25)).await;
            stopper.cancel();
        });

        h.scanner.run(cancel).await;

        assert_eq!(h.total_detects("ArtistX"), 3);
        assert_eq!(h.notifier.attempts().len(), 1);
    }

    #[tokio::test]
    async fn test_drop_without_finish_persists() {
        let mut h = Harness::new().await;
        h.presence.set(vec![listening(42, "ArtistX")]);
        h.scanner.tick().await;
        h.scanner.tick().await;

        let Harness { scanner, dir, .. } = h;
        let data_dir = dir.path().join("data");
        drop(scanner);

        let persisted = LedgerStore::new(&data_dir).load();
        assert_eq!(persisted.artist("ArtistX").unwrap().total_detects, 2);
    }

    #[tokio::test]
    async fn test_finish_persists_latest_state() {
        let mut h = Harness::new().await;
        h.presence.set(vec![listening(42, "ArtistX")]);
        h.scanner.tick().await;
        h.scanner.tick().await;

        let Harness { scanner, dir, .. } = h;
        scanner.finish().unwrap();

        let persisted = LedgerStore::new(dir.path().join("data")).load();
        assert_eq!(persisted.incident_count(), 1);
        assert_eq!(persisted.artist("ArtistX").unwrap().total_detects, 2);
    }
}
