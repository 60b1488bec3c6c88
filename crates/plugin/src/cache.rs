//! Settings cache.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use notifier::{PluginSettings, SettingsError, SettingsProvider};

/// Remembers the last settings read from a slower source until told they changed.
///
/// Failed reads are never cached.
pub struct CachedSettings {
    source: Arc<dyn SettingsProvider>,
    cached: RwLock<Option<PluginSettings>>,
}

impl CachedSettings {
    /// Wraps `source`. Nothing is read until the first request.
    pub fn new(source: Arc<dyn SettingsProvider>) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
        }
    }

    /// Drops the cached value; the next read goes to the source.
    pub async fn invalidate(&self) {
        debug!("plugin settings cache invalidated");
        *self.cached.write().await = None;
    }
}

#[async_trait]
impl SettingsProvider for CachedSettings {
    async fn plugin_settings(&self) -> Result<PluginSettings, SettingsError> {
        if let Some(settings) = self.cached.read().await.as_ref() {
            return Ok(settings.clone());
        }

        let mut cached = self.cached.write().await;
        if let Some(settings) = cached.as_ref() {
            return Ok(settings.clone());
        }
        let fresh = self.source.plugin_settings().await?;
        *cached = Some(fresh.clone());
        Ok(fresh)
    }
}

impl std::fmt::Debug for CachedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSettings").finish_non_exhaustive()
    }
}
