//! Notification dispatcher.
//!
//! Reads the settings, composes the message, posts it through the
//! [`WebhookTransport`] and folds every possible failure into a
//! [`NotificationResult`]. Nothing escapes [`NotificationDispatcher::notify`].

use std::sync::Arc;

use tracing::{error, info};

use crate::{
    compose, DeliveryId, NotificationResult, NotifierError, SettingsProvider, StageEvent,
    WebhookResponse, WebhookTransport,
};

/// Delivers stage-status notifications to the configured webhook.
///
/// Stateless between calls; concurrent `notify` calls are independent.
#[derive(Clone)]
pub struct NotificationDispatcher {
    settings: Arc<dyn SettingsProvider>,
    transport: Arc<dyn WebhookTransport>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher over the given settings source and transport.
    pub fn new(settings: Arc<dyn SettingsProvider>, transport: Arc<dyn WebhookTransport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Sends one notification for `event`. Never fails; failures are reported
    /// in the returned result.
    #[tracing::instrument(
        name = "notify",
        skip_all,
        fields(
            delivery_id = %DeliveryId::new_random(),
            stage = %event.locator(),
            result = %event.result,
        )
    )]
    pub async fn notify(&self, event: &StageEvent) -> NotificationResult {
        match self.deliver(event).await {
            Ok(response) => {
                info!(
                    status = response.status,
                    body = %response.body,
                    "Notification status({}): {}",
                    response.status,
                    response.body
                );
                NotificationResult::success()
            }
            Err(err) => {
                error!(error = %err, "Failed to send notification to gitter");
                NotificationResult::failure(err.to_string())
            }
        }
    }

    async fn deliver(&self, event: &StageEvent) -> Result<WebhookResponse, NotifierError> {
        let settings = self.settings.plugin_settings().await?;
        settings.validate()?;

        let notification = compose(event, settings.go_server_url())?;
        let body = notification.to_json()?;

        let response = self
            .transport
            .post(settings.gitter_webhook_url(), body)
            .await?;

        if !response.is_success() {
            return Err(NotifierError::DeliveryFailure {
                reason: format!("webhook returned HTTP {}: {}", response.status, response.body),
            });
        }
        Ok(response)
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher").finish_non_exhaustive()
    }
}
