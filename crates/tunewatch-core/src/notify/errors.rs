//! Notification delivery error types.

use std::time::Duration;

use crate::errors::TunewatchError;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Recipient cannot be reached: {message}")]
    Unreachable { message: String },

    #[error("Platform rejected the message: {message}")]
    Rejected { message: String },

    #[error("Delivery timed out after {after:?}")]
    Timeout { after: Duration },
}

impl TunewatchError for DeliveryError {
    fn error_code(&self) -> &'static str {
        match self {
            DeliveryError::Unreachable { .. } => "DELIVERY_UNREACHABLE",
            DeliveryError::Rejected { .. } => "DELIVERY_REJECTED",
            DeliveryError::Timeout { .. } => "DELIVERY_TIMEOUT",
        }
    }

    fn is_user_error(&self) -> bool {
        // Closed DMs are a recipient setting, not a fault on our side
        matches!(self, DeliveryError::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_dms_are_a_user_error() {
        let error = DeliveryError::Rejected {
            message: "Cannot send messages to this user".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Platform rejected the message: Cannot send messages to this user"
        );
        assert_eq!(error.error_code(), "DELIVERY_REJECTED");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_transport_failure_is_not_a_user_error() {
        let error = DeliveryError::Unreachable {
            message: "connection reset".to_string(),
        };
        assert_eq!(error.to_string(), "Recipient cannot be reached: connection reset");
        assert_eq!(error.error_code(), "DELIVERY_UNREACHABLE");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_timeout() {
        let error = DeliveryError::Timeout {
            after: Duration::from_secs(15),
        };
        assert_eq!(error.to_string(), "Delivery timed out after 15s");
        assert_eq!(error.error_code(), "DELIVERY_TIMEOUT");
        assert!(!error.is_user_error());
    }
}
