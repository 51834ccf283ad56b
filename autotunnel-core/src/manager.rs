//! Commands over stored tunnels: delete, duplicate, primary and LAN routing.

use tracing::{debug, info, instrument};

use crate::error::{AutoTunnelError, StoreError, StoreResult};
use crate::models::TunnelConfig;
use crate::naming::unique_name;
use crate::store::{SettingsStore, TunnelStore};

/// Routing of local networks for every peer of a tunnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanPolicy {
    /// Route only public IPv4 space through the tunnel
    Exclude,
    /// Route everything through the tunnel
    Include,
}

/// Saves a copy of `tunnel` under a name unique in `store`
pub(crate) async fn duplicate_tunnel<S: TunnelStore + ?Sized>(
    store: &S,
    tunnel: &TunnelConfig,
) -> StoreResult<TunnelConfig> {
    let existing = store.tunnel_names().await?;
    let copy = tunnel.renamed(unique_name(&tunnel.name, &existing));
    store.save(copy.clone()).await?;
    debug!(source = %tunnel.name, copy = %copy.name, "Duplicated tunnel");
    Ok(copy)
}

/// Operations on tunnels already in the store
#[derive(Debug)]
pub struct TunnelManager<S> {
    store: S,
}

impl<S: TunnelStore + SettingsStore> TunnelManager<S> {
    /// Creates a manager over a store
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns every stored tunnel
    pub async fn list(&self) -> StoreResult<Vec<TunnelConfig>> {
        self.store.get_all().await
    }

    /// Looks up a tunnel, failing if it does not exist
    pub async fn get(&self, name: &str) -> StoreResult<TunnelConfig> {
        self.store
            .find(name)
            .await?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Deletes a tunnel.
    ///
    /// Deleting the primary tunnel, or the last remaining one, also turns
    /// off auto-tunneling and always-on VPN.
    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<(), AutoTunnelError> {
        let tunnel = self.get(name).await?;
        let was_last = self.store.count().await? == 1;
        self.store.delete(&tunnel).await?;

        if tunnel.is_primary_tunnel || was_last {
            let settings = self.store.load_settings().await?;
            if settings.auto_tunnel_enabled || settings.always_on_vpn_enabled {
                self.store
                    .save_settings(&settings.with_auto_tunnel_reset())
                    .await?;
                info!("Disabled auto-tunnel after deleting tunnel");
            }
        }

        info!("Deleted tunnel");
        Ok(())
    }

    /// Saves a copy of a tunnel under a unique name
    #[instrument(skip(self))]
    pub async fn duplicate(&self, name: &str) -> StoreResult<TunnelConfig> {
        let tunnel = self.get(name).await?;
        duplicate_tunnel(&self.store, &tunnel).await
    }

    /// Marks one tunnel as primary and clears the flag on all others
    #[instrument(skip(self))]
    pub async fn set_primary(&self, name: &str) -> StoreResult<TunnelConfig> {
        let tunnels = self.store.get_all().await?;
        let target = tunnels
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?
            .with_primary(true);

        for tunnel in tunnels.iter().filter(|t| t.is_primary_tunnel && t.name != name) {
            self.store.save(tunnel.with_primary(false)).await?;
        }
        self.store.save(target.clone()).await?;

        info!("Set primary tunnel");
        Ok(target)
    }

    /// Rewrites the allowed IPs of every peer of a tunnel
    #[instrument(skip(self))]
    pub async fn set_lan_policy(
        &self,
        name: &str,
        policy: LanPolicy,
    ) -> Result<TunnelConfig, AutoTunnelError> {
        let tunnel = self.get(name).await?;
        let parsed = tunnel.parse()?;
        let parsed = match policy {
            LanPolicy::Exclude => parsed.exclude_lan_all(),
            LanPolicy::Include => parsed.include_lan_all(),
        };

        let updated = TunnelConfig::from_parsed(&tunnel.name, &parsed)
            .with_primary(tunnel.is_primary_tunnel);
        self.store.save(updated.clone()).await?;

        info!(peers = parsed.peers.len(), "Updated LAN routing");
        Ok(updated)
    }

    /// Returns true if every peer of the tunnel excludes local networks
    pub async fn is_lan_excluded(&self, name: &str) -> Result<bool, AutoTunnelError> {
        let tunnel = self.get(name).await?;
        Ok(tunnel.parse()?.is_lan_excluded())
    }
}
