//! Persisted tunnel record.

use serde::{Deserialize, Serialize};

use crate::wgconf::ParsedTunnel;

/// A named tunnel as stored by the application.
///
/// Records are treated as immutable values: changing a tunnel means saving
/// a replacement under the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelConfig {
    /// Unique, non-empty display name
    pub name: String,
    /// Configuration in the baseline (WireGuard) dialect
    pub wg_quick: String,
    /// Configuration in the extended (AmneziaWG) dialect
    pub am_quick: String,
    /// Whether this tunnel is the one auto-tunneling activates
    #[serde(default)]
    pub is_primary_tunnel: bool,
}

impl TunnelConfig {
    /// Creates a record from pre-rendered texts
    #[must_use]
    pub fn new(name: impl Into<String>, wg_quick: impl Into<String>, am_quick: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wg_quick: wg_quick.into(),
            am_quick: am_quick.into(),
            is_primary_tunnel: false,
        }
    }

    /// Renders both dialects of a parsed tunnel into a new record
    #[must_use]
    pub fn from_parsed(name: impl Into<String>, tunnel: &ParsedTunnel) -> Self {
        Self::new(name, tunnel.to_wg_quick(), tunnel.to_am_quick())
    }

    /// Returns a copy under another name, never primary
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wg_quick: self.wg_quick.clone(),
            am_quick: self.am_quick.clone(),
            is_primary_tunnel: false,
        }
    }

    /// Returns a copy with the primary flag set as given
    #[must_use]
    pub fn with_primary(&self, primary: bool) -> Self {
        Self {
            is_primary_tunnel: primary,
            ..self.clone()
        }
    }

    /// Parses the stored extended text back into a tunnel
    pub fn parse(&self) -> Result<ParsedTunnel, crate::error::ConfigFormatError> {
        ParsedTunnel::parse_extended(&self.am_quick)
    }
}
