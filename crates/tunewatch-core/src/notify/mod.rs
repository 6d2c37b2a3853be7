//! Notifications to listeners of watch-listed artists.
//!
//! Best-effort: a failed delivery is logged by the caller and never retried.
//! The platform side implements [`Notifier`]; this module owns the content
//! and the timeout around each attempt.

pub mod errors;
pub mod message;

pub use errors::DeliveryError;
pub use message::{DISCLAIMER, NOTIFICATION_TITLE, Notification, format_report_url};

use std::future::Future;
use std::time::Duration;

use crate::presence::SubjectId;

/// Sends a direct message to a subject.
pub trait Notifier: Send + Sync + 'static {
    fn send(
        &self,
        subject: SubjectId,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// Send with an upper bound on how long the attempt may take.
pub async fn deliver<N: Notifier>(
    notifier: &N,
    subject: SubjectId,
    notification: &Notification,
    timeout: Duration,
) -> Result<(), DeliveryError> {
    match tokio::time::timeout(timeout, notifier.send(subject, notification)).await {
        Ok(result) => result,
        Err(_) => Err(DeliveryError::Timeout { after: timeout }),
    }
}
