//! tunewatch-core: watch-list matching for live listening activity
//!
//! This library holds everything between the chat platform and the
//! watch-list: it keeps the catalogue fresh, scans presence snapshots,
//! decides who gets notified, and keeps detection statistics on disk.
//!
//! # Main Entry Points
//!
//! - [`service`] - Run both schedulers until shutdown
//! - [`catalogue`] - Fetch and hold the watch-list
//! - [`ledger`] - Persisted incident counter and per-artist statistics
//! - [`scan`] - One presence scan and the scan loop
//! - [`notify`] - Notification content and the delivery boundary

pub mod catalogue;
pub mod dedup;
pub mod errors;
pub mod ledger;
pub mod logging;
pub mod notify;
pub mod presence;
pub mod refresh;
pub mod scan;
pub mod service;
pub mod status;

#[cfg(test)]
mod test_support;

pub use catalogue::{
    Catalogue, CatalogueEntry, CatalogueError, CatalogueHandle, CatalogueSource, CatalogueStore,
    HttpCatalogueSource,
};
pub use dedup::DedupTracker;
pub use errors::TunewatchError;
pub use ledger::{ArtistStat, IncidentCounter, LedgerError, LedgerStore, StatsLedger};
pub use notify::{DeliveryError, Notification, Notifier};
pub use presence::{ActivityKind, PresenceRecord, PresenceSource, SubjectId};
pub use refresh::Refresher;
pub use scan::{ScanSettings, Scanner, TickOutcome};
pub use service::{ShutdownSummary, WatchService, WatchSettings};
pub use status::{StatusKind, StatusReporter, StatusSink, StatusSummary};

// Re-export config types so the binary needs a single dependency for them
pub use tunewatch_config::{ConfigError, TunewatchConfig};

// Re-export logging initialization
pub use logging::init_logging;
