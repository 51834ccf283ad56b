//! In-memory tunnel and settings store.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::AppSettings;
use crate::error::{ConfigResult, StoreError, StoreResult};
use crate::models::TunnelConfig;

use super::{SettingsStore, TunnelStore, upsert};

/// Volatile store, used by tests and by callers that persist elsewhere
#[derive(Debug, Default)]
pub struct InMemoryTunnelStore {
    tunnels: RwLock<Vec<TunnelConfig>>,
    settings: RwLock<AppSettings>,
    saves: AtomicUsize,
}

impl InMemoryTunnelStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with tunnels
    #[must_use]
    pub fn with_tunnels(tunnels: Vec<TunnelConfig>) -> Self {
        Self {
            tunnels: RwLock::new(tunnels),
            ..Self::default()
        }
    }

    /// Creates a store with the given settings
    #[must_use]
    pub fn with_settings(mut self, settings: AppSettings) -> Self {
        self.settings = RwLock::new(settings);
        self
    }

    /// Number of `save` calls received so far
    #[must_use]
    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TunnelStore for InMemoryTunnelStore {
    async fn get_all(&self) -> StoreResult<Vec<TunnelConfig>> {
        Ok(self.tunnels.read().await.clone())
    }

    async fn save(&self, tunnel: TunnelConfig) -> StoreResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        upsert(&mut *self.tunnels.write().await, tunnel);
        Ok(())
    }

    async fn delete(&self, tunnel: &TunnelConfig) -> StoreResult<()> {
        let mut tunnels = self.tunnels.write().await;
        let before = tunnels.len();
        tunnels.retain(|t| t.name != tunnel.name);
        if tunnels.len() == before {
            return Err(StoreError::NotFound(tunnel.name.clone()));
        }
        Ok(())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.tunnels.read().await.len())
    }
}

#[async_trait]
impl SettingsStore for InMemoryTunnelStore {
    async fn load_settings(&self) -> ConfigResult<AppSettings> {
        Ok(self.settings.read().await.clone())
    }

    async fn save_settings(&self, settings: &AppSettings) -> ConfigResult<()> {
        *self.settings.write().await = settings.clone();
        Ok(())
    }
}
