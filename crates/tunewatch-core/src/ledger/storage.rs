//! Ledger persistence
//!
//! Two files in the data directory: the incident counter as a bare decimal
//! integer, and the per-artist statistics as pretty-printed JSON. Reading
//! never fails; missing or corrupt files fall back to empty defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use tunewatch_paths::TunewatchPaths;

use super::errors::LedgerError;
use super::types::{ArtistStat, StatsLedger};

#[derive(Debug, Clone)]
pub struct LedgerStore {
    data_dir: PathBuf,
}

impl LedgerStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read persisted state, degrading to `0` / empty per file.
    pub fn load(&self) -> StatsLedger {
        let incidents = load_incident_count(&TunewatchPaths::incident_count_file(&self.data_dir));
        let artists = load_artist_stats(&TunewatchPaths::artist_stats_file(&self.data_dir));

        debug!(
            event = "core.ledger.load_completed",
            data_dir = %self.data_dir.display(),
            incidents = incidents,
            artists = artists.len(),
        );

        StatsLedger::new(incidents, artists)
    }

    /// Write the incident counter and artist statistics, creating the data
    /// directory if needed.
    pub fn persist(&self, ledger: &StatsLedger) -> Result<(), LedgerError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| LedgerError::CreateDir {
            path: self.data_dir.clone(),
            source,
        })?;

        let stats = serde_json::to_string_pretty(ledger.artists())?;

        let count_path = TunewatchPaths::incident_count_file(&self.data_dir);
        write_file(&count_path, &ledger.incident_count().to_string())?;

        let stats_path = TunewatchPaths::artist_stats_file(&self.data_dir);
        write_file(&stats_path, &stats)?;

        debug!(
            event = "core.ledger.persist_completed",
            data_dir = %self.data_dir.display(),
            incidents = ledger.incident_count(),
            artists = ledger.artists().len(),
        );

        Ok(())
    }
}

/// Write through a sibling temp file and rename it into place, so a crash
/// mid-write leaves the previous file intact.
fn write_file(path: &Path, content: &str) -> Result<(), LedgerError> {
    let temp_file = temp_path(path);
    let fail = |source| LedgerError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = fs::write(&temp_file, content) {
        cleanup_temp_file(&temp_file, &e);
        return Err(fail(e));
    }
    if let Err(e) = fs::rename(&temp_file, path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(fail(e));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file)
        && cleanup_err.kind() != std::io::ErrorKind::NotFound
    {
        warn!(
            event = "core.ledger.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
        );
    }
}

/// Read a file that may legitimately be absent. Other read errors are
/// logged and treated like absence.
fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(
                event = "core.ledger.read_failed",
                file_path = %path.display(),
                error = %e,
                "Could not read persisted state - using defaults"
            );
            None
        }
    }
}

fn load_incident_count(path: &Path) -> u64 {
    let Some(content) = read_optional(path) else {
        return 0;
    };

    match content.trim().parse::<u64>() {
        Ok(count) => count,
        Err(e) => {
            warn!(
                event = "core.ledger.incident_count_parse_failed",
                file_path = %path.display(),
                error = %e,
                "Incident counter file is corrupted - starting from 0"
            );
            0
        }
    }
}

fn load_artist_stats(path: &Path) -> BTreeMap<String, ArtistStat> {
    let Some(content) = read_optional(path) else {
        return BTreeMap::new();
    };

    match serde_json::from_str(&content) {
        Ok(stats) => stats,
        Err(e) => {
            warn!(
                event = "core.ledger.artist_stats_parse_failed",
                file_path = %path.display(),
                error = %e,
                "Artist stats file is corrupted - starting fresh"
            );
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_load_missing_dir_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("never-created"));

        let ledger = store.load();
        assert_eq!(ledger.incident_count(), 0);
        assert!(ledger.artists().is_empty());
    }

    #[test]
    fn test_persist_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let store = LedgerStore::new(&data_dir);

        store.persist(&StatsLedger::default()).unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(
            fs::read_to_string(data_dir.join("incident_count.txt")).unwrap(),
            "0"
        );
        assert_eq!(
            fs::read_to_string(data_dir.join("artist_stats.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_persist_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path());

        let mut ledger = StatsLedger::default();
        let first = Utc.with_ymd_and_hms(2025, 11, 3, 10, 15, 30).unwrap()
            + chrono::Duration::microseconds(123_456);
        ledger.record_detection("ArtistX", first);
        ledger.record_detection("ArtistX", Utc::now());
        ledger.record_detection("Band Y", Utc::now());
        ledger.add_incidents(2);

        store.persist(&ledger).unwrap();
        let loaded = store.load();

        assert_eq!(loaded.incident_count(), 2);
        assert_eq!(loaded.artists(), ledger.artists());
        assert_eq!(loaded.artist("ArtistX").unwrap().first_detected_at, first);
    }

    #[test]
    fn test_corrupt_stats_degrade_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("artist_stats.json"), "{ not json").unwrap();
        fs::write(dir.path().join("incident_count.txt"), "12\n").unwrap();

        let ledger = LedgerStore::new(dir.path()).load();

        // Each file degrades on its own
        assert!(ledger.artists().is_empty());
        assert_eq!(ledger.incident_count(), 12);
    }

    #[test]
    fn test_corrupt_counter_degrades_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("incident_count.txt"), "twelve").unwrap();
        fs::write(
            dir.path().join("artist_stats.json"),
            r#"{"ArtistX": {"first detect": "2025-11-03T10:00:00+00:00", "total detects": 3}}"#,
        )
        .unwrap();

        let ledger = LedgerStore::new(dir.path()).load();

        assert_eq!(ledger.incident_count(), 0);
        assert_eq!(ledger.artist("ArtistX").unwrap().total_detects, 3);
    }

    #[test]
    fn test_persist_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        fs::write(&blocker, "a file, not a directory").unwrap();

        let result = LedgerStore::new(&blocker).persist(&StatsLedger::default());
        assert!(matches!(result, Err(LedgerError::CreateDir { .. })));
    }

    #[test]
    fn test_persist_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path());

        let mut ledger = StatsLedger::default();
        ledger.record_detection("ArtistX", Utc::now());
        store.persist(&ledger).unwrap();
        store.persist(&ledger).unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["artist_stats.json", "incident_count.txt"]);
    }

    #[test]
    fn test_failed_write_keeps_previous_stats() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path());

        let mut before = StatsLedger::default();
        for i in 0..50 {
            before.record_detection(&format!("Artist {}", i), Utc::now());
        }
        store.persist(&before).unwrap();

        // A directory where the staging file would go makes the write fail
        fs::create_dir(dir.path().join("artist_stats.json.tmp")).unwrap();

        let mut after = StatsLedger::default();
        after.record_detection("Someone Else", Utc::now());
        let result = store.persist(&after);
        assert!(matches!(result, Err(LedgerError::WriteFailed { .. })));

        let loaded = store.load();
        assert_eq!(loaded.artists().len(), 50);
        assert_eq!(loaded.artists(), before.artists());
    }
}
