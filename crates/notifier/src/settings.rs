//! Plugin settings, their schema, and the settings port.
//!
//! The GoCD server stores the plugin's settings and hands them out on request.
//! [`SettingsSchema::gitter`] describes the fields the server should render and
//! validate; [`SettingsProvider`] is how the dispatcher reads the current
//! values.

use std::collections::HashMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Settings key of the GoCD server base URL.
pub const GO_SERVER_URL: &str = "go_server_url";

/// Settings key of the Gitter webhook URL.
pub const GITTER_WEBHOOK_URL: &str = "gitter_webhook_url";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while reading or checking plugin settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The settings store could not be reached or returned unreadable data.
    #[error("could not read plugin settings: {reason}")]
    Unavailable {
        /// Human-readable description of the failure.
        reason: String,
    },

    /// A required setting is missing or blank.
    #[error("{message}")]
    Invalid {
        /// Settings key of the offending field.
        key: String,
        /// Human-readable validation message.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// The values configured for the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginSettings {
    #[serde(default)]
    go_server_url: String,
    #[serde(default)]
    gitter_webhook_url: String,
}

impl PluginSettings {
    /// Creates a settings value.
    pub fn new(go_server_url: impl Into<String>, gitter_webhook_url: impl Into<String>) -> Self {
        Self {
            go_server_url: go_server_url.into(),
            gitter_webhook_url: gitter_webhook_url.into(),
        }
    }

    /// Base URL of the GoCD server, used to build trackback links.
    pub fn go_server_url(&self) -> &str {
        &self.go_server_url
    }

    /// Webhook the notification is posted to.
    pub fn gitter_webhook_url(&self) -> &str {
        &self.gitter_webhook_url
    }

    /// Checks the values against [`SettingsSchema::gitter`], reporting the first problem.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let values = HashMap::from([
            (GO_SERVER_URL.to_string(), self.go_server_url.clone()),
            (GITTER_WEBHOOK_URL.to_string(), self.gitter_webhook_url.clone()),
        ]);

        match SettingsSchema::gitter().validate(&values).into_iter().next() {
            Some(ValidationError { key, message }) => Err(SettingsError::Invalid { key, message }),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Source of the current plugin settings.
///
/// Implementations may be backed by the GoCD server, a file, or a cache in
/// front of either. Each call must reflect the latest known values.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Returns the current settings.
    async fn plugin_settings(&self) -> Result<PluginSettings, SettingsError>;
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Metadata for one settings field, as rendered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SettingsField {
    #[serde(skip)]
    key: &'static str,
    display_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<&'static str>,
    required: bool,
    secure: bool,
    display_order: &'static str,
}

impl SettingsField {
    /// A required, non-secure field whose value must not be blank.
    pub const fn non_blank(key: &'static str, display_name: &'static str, display_order: &'static str) -> Self {
        Self {
            key,
            display_name,
            default_value: None,
            required: true,
            secure: false,
            display_order,
        }
    }

    /// Settings key.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Label shown next to the input.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Returns an error message if `value` is not acceptable for this field.
    pub fn validate(&self, value: Option<&str>) -> Option<String> {
        let blank = value.map_or(true, |v| v.trim().is_empty());
        (self.required && blank).then(|| format!("{} must not be blank.", self.display_name))
    }
}

/// One failed check reported back to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Settings key of the offending field.
    pub key: String,
    /// Human-readable message.
    pub message: String,
}

/// The ordered set of settings fields. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSchema {
    fields: Vec<SettingsField>,
}

static GITTER_SCHEMA: LazyLock<SettingsSchema> = LazyLock::new(|| SettingsSchema {
    fields: vec![
        SettingsField::non_blank(GO_SERVER_URL, "Go Server URL", "0"),
        SettingsField::non_blank(GITTER_WEBHOOK_URL, "Gitter webhook URL", "1"),
    ],
});

impl SettingsSchema {
    /// The schema of this plugin: server URL and webhook URL.
    pub fn gitter() -> &'static SettingsSchema {
        &GITTER_SCHEMA
    }

    /// Fields in display order.
    pub fn fields(&self) -> &[SettingsField] {
        &self.fields
    }

    /// Validates raw key/value pairs, one error per failing field.
    pub fn validate(&self, values: &HashMap<String, String>) -> Vec<ValidationError> {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .validate(values.get(field.key).map(String::as_str))
                    .map(|message| ValidationError {
                        key: field.key.to_string(),
                        message,
                    })
            })
            .collect()
    }
}

// Serialized as an object keyed by field key, in declaration order.
impl Serialize for SettingsSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(field.key, field)?;
        }
        map.end()
    }
}
