//! In-memory stand-ins for the platform and the remote catalogue.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::catalogue::{Catalogue, CatalogueError, CatalogueSource};
use crate::notify::{DeliveryError, Notification, Notifier};
use crate::presence::{ActivityKind, PresenceRecord, PresenceSource, SubjectId};
use crate::status::{StatusSink, StatusSummary};

pub(crate) fn listening(subject: u64, artist: &str) -> PresenceRecord {
    PresenceRecord {
        subject_id: SubjectId(subject),
        display_name: format!("user-{}", subject),
        activity_kind: ActivityKind::Listening,
        activity_label: "Spotify".to_string(),
        matched_value: artist.to_string(),
    }
}

/// Serves whatever JSON body it currently holds, like the remote list would.
#[derive(Clone)]
pub(crate) struct JsonSource {
    body: Arc<Mutex<Vec<u8>>>,
}

impl JsonSource {
    pub(crate) fn new(body: &str) -> Self {
        Self {
            body: Arc::new(Mutex::new(body.as_bytes().to_vec())),
        }
    }

    pub(crate) fn set_body(&self, body: &str) {
        *self.body.lock().unwrap() = body.as_bytes().to_vec();
    }
}

impl CatalogueSource for JsonSource {
    async fn fetch(&self) -> Result<Catalogue, CatalogueError> {
        let body = self.body.lock().unwrap().clone();
        Catalogue::parse(&body)
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakePresence {
    records: Arc<Mutex<Vec<PresenceRecord>>>,
}

impl FakePresence {
    pub(crate) fn set(&self, records: Vec<PresenceRecord>) {
        *self.records.lock().unwrap() = records;
    }
}

impl PresenceSource for FakePresence {
    fn snapshot(&self) -> Vec<PresenceRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeliveryMode {
    Deliver,
    Reject,
    Stall,
}

/// Records every attempt, then behaves according to its mode.
#[derive(Clone)]
pub(crate) struct RecordingNotifier {
    attempts: Arc<Mutex<Vec<(SubjectId, Notification)>>>,
    mode: Arc<Mutex<DeliveryMode>>,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self {
            attempts: Arc::default(),
            mode: Arc::new(Mutex::new(DeliveryMode::Deliver)),
        }
    }
}

impl RecordingNotifier {
    pub(crate) fn set_mode(&self, mode: DeliveryMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub(crate) fn attempts(&self) -> Vec<(SubjectId, Notification)> {
        self.attempts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        subject: SubjectId,
        notification: &Notification,
    ) -> Result<(), DeliveryError> {
        self.attempts
            .lock()
            .unwrap()
            .push((subject, notification.clone()));
        let mode = *self.mode.lock().unwrap();

        match mode {
            DeliveryMode::Deliver => Ok(()),
            DeliveryMode::Reject => Err(DeliveryError::Unreachable {
                message: "Cannot send messages to this user".to_string(),
            }),
            DeliveryMode::Stall => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    updates: Mutex<Vec<StatusSummary>>,
}

impl RecordingSink {
    pub(crate) fn updates(&self) -> Vec<StatusSummary> {
        self.updates.lock().unwrap().clone()
    }
}

impl StatusSink for RecordingSink {
    fn update(&self, summary: &StatusSummary) {
        self.updates.lock().unwrap().push(summary.clone());
    }
}
