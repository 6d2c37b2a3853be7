use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct StatsResponse<'a> {
    pub incidents: u64,
    pub tracked_artists: usize,
    pub artists: Vec<ArtistRow<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ArtistRow<'a> {
    pub name: &'a str,
    pub first_detected_at: DateTime<Utc>,
    pub total_detects: u64,
}

