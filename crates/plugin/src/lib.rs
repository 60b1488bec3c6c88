//! GoCD notification-plugin request layer.
//!
//! The GoCD server talks to a notification plugin through named requests
//! with JSON bodies. [`GitterNotificationPlugin`] decodes those requests,
//! answers the settings-related ones from [`notifier::SettingsSchema`], and
//! hands stage-status events to the [`notifier::NotificationDispatcher`].
//!
//! ## Architectural Layer
//!
//! **Orchestration.** This crate sequences calls between the wire format and
//! the [`notifier`] domain. It contains no message-formatting rules of its own.
//!
//! ## Requests
//!
//! | Request | Answer |
//! |---------|--------|
//! | `notifications-interested-in` | `{"notifications":["stage-status"]}` |
//! | `go.plugin-settings.get-configuration` | settings schema |
//! | `go.plugin-settings.get-view` | settings form template |
//! | `go.plugin-settings.validate-configuration` | list of `{key, message}` errors |
//! | `go.plugin-settings.plugin-settings-changed` | `{}`; drops cached settings |
//! | `stage-status` | [`notifier::NotificationResult`] |
//!
//! Stage-status always answers code 200; delivery problems are reported in
//! the body.

mod cache;
mod errors;
mod plugin;
mod request;
mod wire;

pub use cache::CachedSettings;
pub use errors::PluginError;
pub use plugin::GitterNotificationPlugin;
pub use request::{PluginRequest, PluginResponse, RequestName};
pub use wire::parse_stage_status;
