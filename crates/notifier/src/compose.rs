//! Message composition.
//!
//! Pure function from a [`StageEvent`] and the configured server URL to the
//! [`Notification`] posted to the webhook. The message format is consumed by
//! people and by existing chat integrations, so it is kept byte-for-byte
//! stable:
//!
//! ```text
//! [<stage-locator>](<trackback-url>) <status>.<commit-links>
//! ```
//!
//! Commit links from all build causes are appended back to back with no
//! delimiter.

use serde::Serialize;

use crate::{resolve_commit_links, NotifierError, StageEvent, StageLocator, StatusLabel};

/// The JSON body posted to the webhook: `{"message": ..., "status": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Single-line, markdown-flavoured message text.
    pub message: String,
    /// Normalized status label.
    pub status: StatusLabel,
}

impl Notification {
    /// Encodes the notification as the webhook request body.
    pub fn to_json(&self) -> Result<String, NotifierError> {
        serde_json::to_string(self).map_err(|e| NotifierError::DeliveryFailure {
            reason: format!("could not encode payload: {e}"),
        })
    }
}

/// `<server-url>/go/pipelines/<stage-locator>`.
///
/// The server URL is used as configured; a trailing slash is not collapsed.
pub fn trackback_url(server_url: &str, locator: &StageLocator) -> String {
    format!("{server_url}/go/pipelines/{locator}")
}

/// Builds the notification for one stage event.
///
/// Fails only if a build cause carries a repository URL on a recognized host
/// that cannot be normalized.
pub fn compose(event: &StageEvent, server_url: &str) -> Result<Notification, NotifierError> {
    let locator = event.locator();
    let status = event.result.status_label();

    let mut message = format!("[{locator}]({}) {status}.", trackback_url(server_url, &locator));
    for cause in &event.build_causes {
        message.push_str(&resolve_commit_links(cause)?);
    }

    Ok(Notification { message, status })
}
