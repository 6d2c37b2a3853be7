//! Derived status line shown on the bot's profile.

use std::sync::Arc;

use tracing::debug;

use crate::catalogue::CatalogueHandle;
use crate::ledger::IncidentCounter;

/// Availability shown next to the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    DoNotDisturb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub text: String,
    pub status: StatusKind,
}

impl StatusSummary {
    pub fn new(incidents: u64, catalogue_size: usize) -> Self {
        Self {
            text: format!(
                "Reported {} incidents. {} AI accounts in database",
                incidents, catalogue_size
            ),
            status: StatusKind::DoNotDisturb,
        }
    }
}

/// Accepts status updates. Implementations report their own failures;
/// an update is fire-and-forget for the caller.
pub trait StatusSink: Send + Sync + 'static {
    fn update(&self, summary: &StatusSummary);
}

/// Builds the summary from live state and pushes it to the sink.
///
/// Both schedulers hold a clone, so either can publish after a change.
pub struct StatusReporter<S> {
    sink: Arc<S>,
    catalogue: CatalogueHandle,
    incidents: IncidentCounter,
}

impl<S> Clone for StatusReporter<S> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            catalogue: self.catalogue.clone(),
            incidents: self.incidents.clone(),
        }
    }
}

impl<S: StatusSink> StatusReporter<S> {
    pub fn new(sink: Arc<S>, catalogue: CatalogueHandle, incidents: IncidentCounter) -> Self {
        Self {
            sink,
            catalogue,
            incidents,
        }
    }

    pub fn current(&self) -> StatusSummary {
        StatusSummary::new(self.incidents.get(), self.catalogue.size())
    }

    pub fn publish(&self) -> StatusSummary {
        let summary = self.current();
        debug!(event = "core.status.publish_started", text = %summary.text);
        self.sink.update(&summary);
        summary
    }
}
