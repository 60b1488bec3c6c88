//! Request routing.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use notifier::{NotificationDispatcher, SettingsProvider, SettingsSchema, WebhookTransport};

use crate::wire::parse_settings_to_validate;
use crate::{parse_stage_status, CachedSettings, PluginError, PluginRequest, PluginResponse, RequestName};

const SETTINGS_TEMPLATE: &str = include_str!("templates/plugin-settings.template.html");

/// The Gitter notification plugin: one entry point for every server request.
#[derive(Debug, Clone)]
pub struct GitterNotificationPlugin {
    settings: Arc<CachedSettings>,
    dispatcher: NotificationDispatcher,
}

impl GitterNotificationPlugin {
    /// Wires the plugin over a settings source and a webhook transport.
    ///
    /// Settings are cached until a `plugin-settings-changed` request arrives.
    pub fn new(settings: Arc<dyn SettingsProvider>, transport: Arc<dyn WebhookTransport>) -> Self {
        let settings = Arc::new(CachedSettings::new(settings));
        let dispatcher = NotificationDispatcher::new(settings.clone(), transport);
        Self {
            settings,
            dispatcher,
        }
    }

    /// Answers one request.
    ///
    /// Only an unknown request name is returned as an error. A body that
    /// cannot be decoded yields a 500 response; a failed delivery yields a
    /// 200 response whose body says so.
    #[tracing::instrument(name = "plugin_request", skip_all, fields(request = %request.name))]
    pub async fn handle(&self, request: &PluginRequest) -> Result<PluginResponse, PluginError> {
        let name: RequestName = request.name.parse()?;

        match self.execute(name, &request.body).await {
            Ok(response) => Ok(response),
            Err(err) => {
                warn!(error = %err, "request could not be processed");
                Ok(PluginResponse::internal_error(&err))
            }
        }
    }

    async fn execute(&self, name: RequestName, body: &str) -> Result<PluginResponse, PluginError> {
        match name {
            RequestName::NotificationsInterestedIn => {
                PluginResponse::success(&json!({ "notifications": ["stage-status"] }))
            }
            RequestName::GetConfiguration => PluginResponse::success(SettingsSchema::gitter()),
            RequestName::GetView => PluginResponse::success(&json!({ "template": SETTINGS_TEMPLATE })),
            RequestName::ValidateConfiguration => {
                let values = parse_settings_to_validate(body)?;
                PluginResponse::success(&SettingsSchema::gitter().validate(&values))
            }
            RequestName::PluginSettingsChanged => {
                self.settings.invalidate().await;
                PluginResponse::success(&json!({}))
            }
            RequestName::StageStatus => {
                let event = parse_stage_status(body)?;
                let result = self.dispatcher.notify(&event).await;
                info!(stage = %event.locator(), success = result.is_success(), "stage-status handled");
                PluginResponse::success(&result)
            }
        }
    }
}
