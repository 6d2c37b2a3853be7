//! Built-in fallback values for every optional setting.

/// Community-maintained list of AI music artists.
pub const DEFAULT_CATALOGUE_URL: &str =
    "https://raw.githubusercontent.com/xoundbyte/soul-over-ai/refs/heads/main/dist/artists.json";

/// Public page for a catalogue entry; `{}` is replaced by the entry id.
pub const DEFAULT_REPORT_URL_TEMPLATE: &str = "https://souloverai.com/artist/{}";

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 15;

/// Activity name the platform reports for music listening.
pub const DEFAULT_ACTIVITY_LABEL: &str = "Spotify";
