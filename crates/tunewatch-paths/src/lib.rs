use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("home directory not found, set the $HOME environment variable")]
    HomeNotFound,
}

/// File name of the persisted incident counter inside the data directory.
pub const INCIDENT_COUNT_FILE: &str = "incident_count.txt";

/// File name of the persisted per-artist statistics inside the data directory.
pub const ARTIST_STATS_FILE: &str = "artist_stats.json";

/// Centralized path construction for the `~/.tunewatch/` directory layout.
///
/// Use `resolve()` in production code and `from_dir()` in tests. The data
/// directory can be relocated through configuration, so the per-file helpers
/// take the data directory explicitly.
#[derive(Debug, Clone)]
pub struct TunewatchPaths {
    base_dir: PathBuf,
}

impl TunewatchPaths {
    /// Resolve paths from the user's home directory (`~/.tunewatch`).
    pub fn resolve() -> Result<Self, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeNotFound)?;
        Ok(Self {
            base_dir: home.join(".tunewatch"),
        })
    }

    /// Create paths from an explicit base directory. Use in tests.
    pub fn from_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// The base `~/.tunewatch` directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Default location of persisted detection state.
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn user_config(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    // --- Files inside a (possibly relocated) data directory ---

    pub fn incident_count_file(data_dir: &Path) -> PathBuf {
        data_dir.join(INCIDENT_COUNT_FILE)
    }

    pub fn artist_stats_file(data_dir: &Path) -> PathBuf {
        data_dir.join(ARTIST_STATS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_paths() -> TunewatchPaths {
        TunewatchPaths::from_dir(PathBuf::from("/home/user/.tunewatch"))
    }

    #[test]
    fn test_resolve_returns_ok_when_home_set() {
        // HOME is set in CI and dev environments
        let result = TunewatchPaths::resolve();
        assert!(result.is_ok());
        let paths = result.unwrap();
        assert!(paths.base_dir().to_string_lossy().contains(".tunewatch"));
    }

    #[test]
    fn test_from_dir() {
        let paths = TunewatchPaths::from_dir(PathBuf::from("/tmp/test-tunewatch"));
        assert_eq!(paths.base_dir(), Path::new("/tmp/test-tunewatch"));
    }

    #[test]
    fn test_data_dir() {
        assert_eq!(
            test_paths().data_dir(),
            PathBuf::from("/home/user/.tunewatch/data")
        );
    }

    #[test]
    fn test_user_config() {
        assert_eq!(
            test_paths().user_config(),
            PathBuf::from("/home/user/.tunewatch/config.toml")
        );
    }

    #[test]
    fn test_data_files_follow_relocated_dir() {
        let data_dir = Path::new("/srv/tunewatch");
        assert_eq!(
            TunewatchPaths::incident_count_file(data_dir),
            PathBuf::from("/srv/tunewatch/incident_count.txt")
        );
        assert_eq!(
            TunewatchPaths::artist_stats_file(data_dir),
            PathBuf::from("/srv/tunewatch/artist_stats.json")
        );
    }
}
