use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Detection history of one catalogue entry.
///
/// On disk the keys are `"first detect"` and `"total detects"`; the
/// camelCase spellings are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistStat {
    #[serde(rename = "first detect", alias = "firstDetectedAt")]
    pub first_detected_at: DateTime<Utc>,

    #[serde(rename = "total detects", alias = "totalDetects")]
    pub total_detects: u64,
}

/// Total notifications ever sent (or attempted).
///
/// Clones share one value. Only the ledger can increase it; every other
/// holder just reads it, e.g. for the status summary.
#[derive(Debug, Clone, Default)]
pub struct IncidentCounter(Arc<AtomicU64>);

impl IncidentCounter {
    pub fn new(initial: u64) -> Self {
        Self(Arc::new(AtomicU64::new(initial)))
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    fn add(&self, n: u64) -> u64 {
        self.0.fetch_add(n, Ordering::AcqRel) + n
    }
}

#[derive(Debug, Default)]
pub struct StatsLedger {
    incidents: IncidentCounter,
    artists: BTreeMap<String, ArtistStat>,
}

impl StatsLedger {
    pub fn new(incidents: u64, artists: BTreeMap<String, ArtistStat>) -> Self {
        Self {
            incidents: IncidentCounter::new(incidents),
            artists,
        }
    }

    /// Count one detection of `name`. The first detection fixes `first_detected_at`.
    pub fn record_detection(&mut self, name: &str, at: DateTime<Utc>) -> &ArtistStat {
        let stat = self
            .artists
            .entry(name.to_string())
            .or_insert_with(|| ArtistStat {
                first_detected_at: at,
                total_detects: 0,
            });
        stat.total_detects += 1;
        stat
    }

    /// Add newly sent notifications. Returns the new total.
    pub fn add_incidents(&mut self, n: u64) -> u64 {
        self.incidents.add(n)
    }

    pub fn incident_count(&self) -> u64 {
        self.incidents.get()
    }

    /// Shared read-only view of the incident total.
    pub fn incident_counter(&self) -> IncidentCounter {
        self.incidents.clone()
    }

    pub fn artists(&self) -> &BTreeMap<String, ArtistStat> {
        &self.artists
    }

    pub fn artist(&self, name: &str) -> Option<&ArtistStat> {
        self.artists.get(name)
    }

    /// Entries ordered by detection count, most detected first; ties by name.
    pub fn ranked(&self) -> Vec<(&str, &ArtistStat)> {
        let mut ranked: Vec<(&str, &ArtistStat)> = self
            .artists
            .iter()
            .map(|(name, stat)| (name.as_str(), stat))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.total_detects
                .cmp(&a.1.total_detects)
                .then_with(|| a.0.cmp(b.0))
        });
        ranked
    }
}
