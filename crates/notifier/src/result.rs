//! The outcome reported back to the plugin host.

use serde::{Deserialize, Serialize};

/// Whether the notification reached the webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// The webhook accepted the notification.
    Success,
    /// Something went wrong; see [`NotificationResult::messages`].
    Failure,
}

/// Serialized as `{"status":"success"}` or
/// `{"status":"failure","messages":["<error text>"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Delivery outcome.
    pub status: DeliveryStatus,
    /// Failure messages; absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,
}

impl NotificationResult {
    /// A successful delivery.
    pub fn success() -> Self {
        Self {
            status: DeliveryStatus::Success,
            messages: None,
        }
    }

    /// A failed delivery with one message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Failure,
            messages: Some(vec![message.into()]),
        }
    }

    /// Returns `true` if the notification was delivered.
    pub fn is_success(&self) -> bool {
        self.status == DeliveryStatus::Success
    }
}
