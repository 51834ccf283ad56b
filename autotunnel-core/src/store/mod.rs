//! Persistence collaborators for tunnels and settings.
//!
//! The import engine only talks to these traits. Two implementations exist:
//! [`InMemoryTunnelStore`] here, and the file-backed
//! [`ConfigManager`](crate::config::ConfigManager).

mod memory;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppSettings;
use crate::error::{ConfigResult, StoreResult};
use crate::models::TunnelConfig;

pub use memory::InMemoryTunnelStore;

/// Storage for tunnel records.
///
/// Each call stands alone; there is no multi-record transaction.
#[async_trait]
pub trait TunnelStore: Send + Sync {
    /// Returns every stored tunnel, in insertion order
    async fn get_all(&self) -> StoreResult<Vec<TunnelConfig>>;

    /// Inserts a tunnel, replacing any record with the same name
    async fn save(&self, tunnel: TunnelConfig) -> StoreResult<()>;

    /// Removes the tunnel with the record's name
    async fn delete(&self, tunnel: &TunnelConfig) -> StoreResult<()>;

    /// Returns the complete set of current names
    async fn tunnel_names(&self) -> StoreResult<HashSet<String>> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .map(|tunnel| tunnel.name)
            .collect())
    }

    /// Looks a tunnel up by exact name
    async fn find(&self, name: &str) -> StoreResult<Option<TunnelConfig>> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .find(|tunnel| tunnel.name == name))
    }

    /// Returns the number of stored tunnels
    async fn count(&self) -> StoreResult<usize> {
        Ok(self.get_all().await?.len())
    }
}

#[async_trait]
impl<T: TunnelStore + ?Sized> TunnelStore for Arc<T> {
    async fn get_all(&self) -> StoreResult<Vec<TunnelConfig>> {
        (**self).get_all().await
    }

    async fn save(&self, tunnel: TunnelConfig) -> StoreResult<()> {
        (**self).save(tunnel).await
    }

    async fn delete(&self, tunnel: &TunnelConfig) -> StoreResult<()> {
        (**self).delete(tunnel).await
    }

    async fn tunnel_names(&self) -> StoreResult<HashSet<String>> {
        (**self).tunnel_names().await
    }

    async fn find(&self, name: &str) -> StoreResult<Option<TunnelConfig>> {
        (**self).find(name).await
    }

    async fn count(&self) -> StoreResult<usize> {
        (**self).count().await
    }
}

/// Storage for application settings
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads settings, falling back to defaults when none are stored
    async fn load_settings(&self) -> ConfigResult<AppSettings>;

    /// Persists settings
    async fn save_settings(&self, settings: &AppSettings) -> ConfigResult<()>;
}

#[async_trait]
impl<T: SettingsStore + ?Sized> SettingsStore for Arc<T> {
    async fn load_settings(&self) -> ConfigResult<AppSettings> {
        (**self).load_settings().await
    }

    async fn save_settings(&self, settings: &AppSettings) -> ConfigResult<()> {
        (**self).save_settings(settings).await
    }
}

/// Replaces or appends `tunnel` in `tunnels` by name
pub(crate) fn upsert(tunnels: &mut Vec<TunnelConfig>, tunnel: TunnelConfig) {
    if let Some(slot) = tunnels.iter_mut().find(|t| t.name == tunnel.name) {
        *slot = tunnel;
    } else {
        tunnels.push(tunnel);
    }
}
