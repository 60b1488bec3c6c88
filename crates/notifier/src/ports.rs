//! The outbound delivery port.
//!
//! [`WebhookTransport`] performs one HTTPS POST and hands back whatever the
//! webhook answered. Deciding whether that answer counts as a successful
//! delivery is the dispatcher's job, not the transport's.

use async_trait::async_trait;
use thiserror::Error;

/// Status code and body returned by the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    /// HTTP status code.
    pub status: u16,
    /// Full response body, decoded as UTF-8.
    pub body: String,
}

impl WebhookResponse {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP status line: the request never got a readable answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The webhook URL could not be parsed.
    #[error("invalid webhook URL '{url}': {reason}")]
    InvalidUrl {
        /// The configured URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The webhook URL does not use TLS.
    #[error("webhook URL '{url}' must use https")]
    InsecureScheme {
        /// The configured URL.
        url: String,
    },

    /// Connecting, the TLS handshake, or sending the request failed.
    #[error("request to webhook failed: {reason}")]
    Request {
        /// Underlying client message.
        reason: String,
    },

    /// The response arrived but its body could not be read.
    #[error("could not read webhook response: {reason}")]
    Body {
        /// Underlying client message.
        reason: String,
    },
}

/// Sends an encoded notification to a webhook.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// POSTs `body` (a UTF-8 JSON document) to `url` and returns the response.
    ///
    /// One attempt only. Implementations must release the connection on every
    /// return path.
    async fn post(&self, url: &str, body: String) -> Result<WebhookResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_2xx_responses_are_successful() {
        let response = |status| WebhookResponse {
            status,
            body: String::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(301).is_success());
        assert!(!response(404).is_success());
        assert!(!response(500).is_success());
    }
}
