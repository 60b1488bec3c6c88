//! Configuration file and the file-backed settings provider.
//!
//! ```toml
//! go_server_url = "https://ci.example.org"
//! gitter_webhook_url = "https://webhooks.gitter.im/e/0123456789abcdef"
//!
//! [client]
//! connect_timeout_secs = 10
//! request_timeout_secs = 30
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use gitter::WebhookClientConfig;
use notifier::{PluginSettings, SettingsError, SettingsProvider};

/// Contents of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// GoCD server base URL.
    #[serde(default)]
    pub go_server_url: Option<String>,
    /// Gitter webhook URL.
    #[serde(default)]
    pub gitter_webhook_url: Option<String>,
    /// HTTP client tuning.
    #[serde(default)]
    pub client: WebhookClientConfig,
}

impl ConfigFile {
    /// Reads and parses `path`. A missing file is an empty configuration.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", path.display()));
            }
        };
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// Replaces `go_server_url`.
    pub go_server_url: Option<String>,
    /// Replaces `gitter_webhook_url`.
    pub gitter_webhook_url: Option<String>,
}

/// Reads the plugin settings from the configuration file on every call.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    overrides: SettingsOverrides,
}

impl FileSettings {
    /// Creates a provider over `path`.
    pub fn new(path: PathBuf, overrides: SettingsOverrides) -> Self {
        Self { path, overrides }
    }
}

#[async_trait]
impl SettingsProvider for FileSettings {
    async fn plugin_settings(&self) -> Result<PluginSettings, SettingsError> {
        let file = ConfigFile::load(&self.path)
            .await
            .map_err(|e| SettingsError::Unavailable {
                reason: format!("{e:#}"),
            })?;

        let overrides = self.overrides.clone();
        Ok(PluginSettings::new(
            overrides.go_server_url.or(file.go_server_url).unwrap_or_default(),
            overrides
                .gitter_webhook_url
                .or(file.gitter_webhook_url)
                .unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_settings_and_client_tuning() {
        let file = write_config(
            r#"
            go_server_url = "https://ci.example.org"
            gitter_webhook_url = "https://webhooks.gitter.im/e/abc"

            [client]
            connect_timeout_secs = 10
            "#,
        );

        let config = ConfigFile::load(file.path()).await.unwrap();

        assert_eq!(config.go_server_url.as_deref(), Some("https://ci.example.org"));
        assert_eq!(config.client, WebhookClientConfig::default().with_connect_timeout(10));
    }

    #[tokio::test]
    async fn missing_file_is_empty_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load(&dir.path().join("absent.toml")).await.unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[tokio::test]
    async fn unknown_keys_are_rejected() {
        let file = write_config("go_server = \"https://ci\"\n");
        let err = ConfigFile::load(file.path()).await.unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }

    #[tokio::test]
    async fn overrides_win_over_file_values() {
        let file = write_config(
            "go_server_url = \"https://from-file\"\ngitter_webhook_url = \"https://hook\"\n",
        );
        let settings = FileSettings::new(
            file.path().to_path_buf(),
            SettingsOverrides {
                go_server_url: Some("https://from-flag".to_string()),
                gitter_webhook_url: None,
            },
        );

        let resolved = settings.plugin_settings().await.unwrap();

        assert_eq!(resolved, PluginSettings::new("https://from-flag", "https://hook"));
    }

    #[tokio::test]
    async fn unreadable_file_makes_settings_unavailable() {
        let file = write_config("go_server_url = [");
        let settings = FileSettings::new(file.path().to_path_buf(), SettingsOverrides::default());

        let err = settings.plugin_settings().await.unwrap_err();

        assert!(matches!(err, SettingsError::Unavailable { .. }));
    }
}
