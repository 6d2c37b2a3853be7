//! Presence records as the core sees them.
//!
//! The chat platform's own activity types are converted at the boundary
//! (see the `tunewatch` binary); nothing in this crate knows about them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a monitored user.
///
/// The same person observed through several guild memberships carries the
/// same `SubjectId`, which is what notification suppression keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub u64);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of activity a presence reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Playing,
    Streaming,
    Listening,
    Watching,
    Custom,
    Competing,
    Other,
}

/// One activity of one subject at the moment of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceRecord {
    pub subject_id: SubjectId,
    /// Name shown to humans; used only in log output.
    pub display_name: String,
    pub activity_kind: ActivityKind,
    /// Source of the activity as reported by the platform (e.g. "Spotify").
    pub activity_label: String,
    /// The value looked up in the catalogue (the artist string).
    pub matched_value: String,
}

impl PresenceRecord {
    /// Whether this record is a listening activity from the given source.
    pub fn is_listening_to(&self, activity_label: &str) -> bool {
        self.activity_kind == ActivityKind::Listening && self.activity_label == activity_label
    }
}

/// Enumerates current presence records across every population the
/// platform adapter knows about.
///
/// A synchronous snapshot: implementations read from a local cache and
/// must not block on the network.
pub trait PresenceSource: Send + Sync + 'static {
    fn snapshot(&self) -> Vec<PresenceRecord>;
}
