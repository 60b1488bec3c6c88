//! Top-level error type for the notifier domain.
//!
//! [`NotifierError`] covers every condition that stops a notification from
//! being delivered. Component-level errors ([`crate::SettingsError`],
//! [`crate::TransportError`]) are defined in their respective modules and
//! convert into it.
//!
//! None of these ever escape [`crate::NotificationDispatcher::notify`]; the
//! dispatcher turns them into a failed [`crate::NotificationResult`] carrying
//! the error's display text.

use thiserror::Error;

use crate::{SettingsError, TransportError};

/// Errors that prevent a notification from being delivered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifierError {
    /// The plugin settings could not be read, or a required value is blank.
    #[error("Plugin settings unavailable: {reason}")]
    SettingsUnavailable {
        /// Human-readable description of the problem.
        reason: String,
    },

    /// A repository URL on a recognized host could not be turned into a web link.
    ///
    /// Produced by: commit link resolution, e.g. a missing `.git` suffix or an
    /// SSH form with a stray `:`.
    #[error("Malformed repository URL '{url}': {reason}")]
    MalformedRepositoryUrl {
        /// The URL as configured on the material.
        url: String,
        /// What structural assumption the URL violated.
        reason: String,
    },

    /// The webhook could not be reached, the exchange failed, or the webhook
    /// answered with a non-2xx status.
    #[error("Failed to deliver notification: {reason}")]
    DeliveryFailure {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl NotifierError {
    pub(crate) fn malformed_url(url: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRepositoryUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<SettingsError> for NotifierError {
    fn from(err: SettingsError) -> Self {
        Self::SettingsUnavailable {
            reason: err.to_string(),
        }
    }
}

impl From<TransportError> for NotifierError {
    fn from(err: TransportError) -> Self {
        Self::DeliveryFailure {
            reason: err.to_string(),
        }
    }
}
