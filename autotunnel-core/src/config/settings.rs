//! Application settings model.

use serde::{Deserialize, Serialize};

/// Scheme accepted for import sources by default
pub const DEFAULT_ACCEPTED_SCHEME: &str = "file";

/// Default upper bound on a single archive entry (1 MiB)
pub const DEFAULT_MAX_ENTRY_BYTES: u64 = 1024 * 1024;

/// Top-level application settings, stored as TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Activate the primary tunnel automatically on trigger conditions
    pub auto_tunnel_enabled: bool,
    /// Keep a tunnel up at all times
    pub always_on_vpn_enabled: bool,
    /// Import behaviour
    pub import: ImportSettings,
}

impl AppSettings {
    /// Returns a copy with auto-tunnel and always-on VPN disabled
    #[must_use]
    pub fn with_auto_tunnel_reset(&self) -> Self {
        Self {
            auto_tunnel_enabled: false,
            always_on_vpn_enabled: false,
            import: self.import.clone(),
        }
    }
}

/// Settings for the import engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Source scheme accepted by the import gate
    pub accepted_scheme: String,
    /// Largest archive entry that will be read
    pub max_entry_bytes: u64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            accepted_scheme: DEFAULT_ACCEPTED_SCHEME.to_string(),
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
        }
    }
}
