//! File-backed settings and tunnel storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{ConfigError, ConfigResult, StoreError, StoreResult};
use crate::models::TunnelConfig;
use crate::store::{SettingsStore, TunnelStore, upsert};

use super::AppSettings;

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "settings.toml";

/// Tunnel list file name inside the config directory
pub const TUNNELS_FILE: &str = "tunnels.json";

/// Manages `settings.toml` and `tunnels.json` in one directory.
///
/// Writes go to a temporary file that is renamed over the target. Within a
/// process, tunnel writes are serialized; separate processes are not
/// coordinated.
#[derive(Debug)]
pub struct ConfigManager {
    config_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl ConfigManager {
    /// Creates a manager for the platform config directory
    /// (`~/.config/autotunnel` on Linux)
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("autotunnel");
        Ok(Self::with_config_dir(config_dir))
    }

    /// Creates a manager for a custom directory
    #[must_use]
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self {
            config_dir,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the configuration directory
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the settings file path
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Returns the tunnel list path
    #[must_use]
    pub fn tunnels_path(&self) -> PathBuf {
        self.config_dir.join(TUNNELS_FILE)
    }

    async fn read_tunnels(&self) -> StoreResult<Vec<TunnelConfig>> {
        let path = self.tunnels_path();
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&content).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn write_tunnels(&self, tunnels: &[TunnelConfig]) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(tunnels)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let path = self.tunnels_path();
        write_atomic(&path, content.as_bytes())
            .await
            .map_err(|source| StoreError::Io { path, source })
    }
}

async fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await
}

#[async_trait]
impl TunnelStore for ConfigManager {
    async fn get_all(&self) -> StoreResult<Vec<TunnelConfig>> {
        self.read_tunnels().await
    }

    async fn save(&self, tunnel: TunnelConfig) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut tunnels = self.read_tunnels().await?;
        tracing::debug!(tunnel = %tunnel.name, "Saving tunnel");
        upsert(&mut tunnels, tunnel);
        self.write_tunnels(&tunnels).await
    }

    async fn delete(&self, tunnel: &TunnelConfig) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut tunnels = self.read_tunnels().await?;
        let before = tunnels.len();
        tunnels.retain(|t| t.name != tunnel.name);
        if tunnels.len() == before {
            return Err(StoreError::NotFound(tunnel.name.clone()));
        }
        tracing::debug!(tunnel = %tunnel.name, "Deleting tunnel");
        self.write_tunnels(&tunnels).await
    }
}

#[async_trait]
impl SettingsStore for ConfigManager {
    async fn load_settings(&self) -> ConfigResult<AppSettings> {
        let path = self.settings_path();
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppSettings::default()),
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    async fn save_settings(&self, settings: &AppSettings) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        let path = self.settings_path();
        write_atomic(&path, content.as_bytes())
            .await
            .map_err(|source| ConfigError::Io { path, source })
    }
}
