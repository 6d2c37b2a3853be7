//! Per-subject notification suppression.
//!
//! Remembers, for each subject, the catalogue entry they were last notified
//! about. Lives only in memory, so a restart re-arms every subject.

use std::collections::HashMap;

use crate::presence::SubjectId;

#[derive(Debug, Default)]
pub struct DedupTracker {
    last_notified: HashMap<SubjectId, String>,
}

impl DedupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `false` while `subject` is still in the episode it was notified about.
    pub fn should_notify(&self, subject: SubjectId, matched_value: &str) -> bool {
        self.last_notified
            .get(&subject)
            .is_none_or(|last| last != matched_value)
    }

    /// Start a new episode for `subject`. Call after every notification
    /// attempt, delivered or not.
    pub fn mark_notified(&mut self, subject: SubjectId, matched_value: &str) {
        self.last_notified.insert(subject, matched_value.to_string());
    }

    /// Number of subjects with an active episode.
    pub fn len(&self) -> usize {
        self.last_notified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_notified.is_empty()
    }
}
