//! Client configuration.

use std::time::Duration;

use serde::Deserialize;

/// Tuning for [`crate::HttpsWebhookClient`].
///
/// Every field is optional. Leaving a timeout unset keeps the HTTP client
/// default, which waits indefinitely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct WebhookClientConfig {
    /// Upper bound on establishing the TCP + TLS connection, in seconds.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Upper bound on the whole exchange, in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl WebhookClientConfig {
    /// Sets the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = Some(secs);
        self
    }

    /// Sets the overall request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub(crate) fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub(crate) fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
