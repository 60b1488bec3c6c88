//! Request and response envelopes.

use serde::{Deserialize, Serialize};

use crate::PluginError;

/// The request names this plugin answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestName {
    /// The server asks which notifications the plugin wants.
    NotificationsInterestedIn,
    /// The server asks for the settings field metadata.
    GetConfiguration,
    /// The server asks for the settings form template.
    GetView,
    /// The server asks the plugin to validate user-entered settings.
    ValidateConfiguration,
    /// The stored settings changed.
    PluginSettingsChanged,
    /// A stage changed state.
    StageStatus,
}

impl RequestName {
    /// Returns the wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotificationsInterestedIn => "notifications-interested-in",
            Self::GetConfiguration => "go.plugin-settings.get-configuration",
            Self::GetView => "go.plugin-settings.get-view",
            Self::ValidateConfiguration => "go.plugin-settings.validate-configuration",
            Self::PluginSettingsChanged => "go.plugin-settings.plugin-settings-changed",
            Self::StageStatus => "stage-status",
        }
    }
}

impl std::str::FromStr for RequestName {
    type Err = PluginError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [
            Self::NotificationsInterestedIn,
            Self::GetConfiguration,
            Self::GetView,
            Self::ValidateConfiguration,
            Self::PluginSettingsChanged,
            Self::StageStatus,
        ]
        .into_iter()
        .find(|candidate| candidate.as_str() == name)
        .ok_or_else(|| PluginError::UnhandledRequest {
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for RequestName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRequest {
    /// Request name, e.g. `"stage-status"`.
    pub name: String,
    /// JSON body; empty for requests that carry none.
    #[serde(default)]
    pub body: String,
}

impl PluginRequest {
    /// Creates a request.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// The answer sent back to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginResponse {
    /// Response code; 200 unless the request itself was unusable.
    pub code: u16,
    /// JSON body.
    pub body: String,
}

impl PluginResponse {
    /// A 200 response with a JSON-encoded body.
    pub fn success(body: &impl Serialize) -> Result<Self, PluginError> {
        let body = serde_json::to_string(body).map_err(|e| PluginError::ResponseEncoding {
            reason: e.to_string(),
        })?;
        Ok(Self { code: 200, body })
    }

    /// A 500 response carrying `{"message": "<error>"}`.
    pub fn internal_error(err: &PluginError) -> Self {
        Self {
            code: 500,
            body: serde_json::json!({ "message": err.to_string() }).to_string(),
        }
    }

    /// Whether the code is 200.
    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}
