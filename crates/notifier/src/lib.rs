//! Core domain for the Gitter stage-status notifier.
//!
//! This crate turns a GoCD stage-status event into a chat message and drives
//! its delivery to a Gitter webhook. Infrastructure crates implement the port
//! traits defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! The HTTPS transport lives in the `gitter` crate and settings storage is
//! supplied by whichever host embeds the [`NotificationDispatcher`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`PipelineName`, `Revision`, `StageLocator`, etc.) |
//! | [`event`] | Stage event model: `StageEvent`, `BuildCause`, `Material`, `StageResult` |
//! | [`commits`] | Commit link resolution for Git materials hosted on GitHub |
//! | [`compose`] | Message composition (`Notification`) |
//! | [`settings`] | Plugin settings, settings schema, and the `SettingsProvider` port |
//! | [`ports`] | The `WebhookTransport` port and its response/error types |
//! | [`result`] | `NotificationResult` returned to the plugin host |
//! | [`dispatch`] | `NotificationDispatcher`, which ties everything together |
//! | [`errors`] | Top-level error type |

pub mod commits;
pub mod compose;
pub mod dispatch;
pub mod errors;
pub mod event;
pub mod identifiers;
pub mod ports;
pub mod result;
pub mod settings;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use commits::{resolve_commit_links, HostingProvider, RepositoryWebUrl};
pub use compose::{compose, trackback_url, Notification};
pub use dispatch::NotificationDispatcher;
pub use errors::NotifierError;
pub use event::{BuildCause, GitMaterial, Material, Modification, StageEvent, StageResult};
pub use identifiers::{
    DeliveryId, PipelineCounter, PipelineName, Revision, StageCounter, StageLocator, StageName,
    StatusLabel,
};
pub use ports::{TransportError, WebhookResponse, WebhookTransport};
pub use result::{DeliveryStatus, NotificationResult};
pub use settings::{
    PluginSettings, SettingsError, SettingsField, SettingsProvider, SettingsSchema,
    ValidationError,
};
