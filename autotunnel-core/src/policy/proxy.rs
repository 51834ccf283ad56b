//! Editable text form of a peer.

use crate::error::ConfigFormatError;
use crate::wgconf::{Endpoint, Key, Peer, parse_network_list};

use super::{IPV4_PUBLIC_NETWORKS, all_ips_joined, join_and_trim, public_networks_joined};

/// A peer as an edit form sees it: every attribute is plain text.
///
/// Blank optional fields mean "unset". `allowed_ips` holds the joined,
/// trimmed list so that policy checks compare text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerProxy {
    /// Base64 public key
    pub public_key: String,
    /// Base64 pre-shared key, or blank
    pub pre_shared_key: String,
    /// Keepalive seconds, or blank
    pub persistent_keepalive: String,
    /// `host:port`, or blank
    pub endpoint: String,
    /// Comma-separated CIDR list
    pub allowed_ips: String,
}

impl Default for PeerProxy {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            pre_shared_key: String::new(),
            persistent_keepalive: String::new(),
            endpoint: String::new(),
            allowed_ips: all_ips_joined(),
        }
    }
}

impl From<&Peer> for PeerProxy {
    fn from(peer: &Peer) -> Self {
        Self {
            public_key: peer.public_key.to_base64(),
            pre_shared_key: peer
                .pre_shared_key
                .as_ref()
                .map(Key::to_base64)
                .unwrap_or_default(),
            persistent_keepalive: peer
                .persistent_keepalive
                .map(|k| k.to_string())
                .unwrap_or_default(),
            endpoint: peer
                .endpoint
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            allowed_ips: peer.allowed_ips_joined().trim().to_string(),
        }
    }
}

impl PeerProxy {
    /// Validates the form and builds a peer
    pub fn to_peer(&self) -> Result<Peer, ConfigFormatError> {
        let public_key = Key::from_base64(&self.public_key, "PublicKey")?;
        let mut peer = Peer::new(public_key);

        if !self.pre_shared_key.trim().is_empty() {
            peer.pre_shared_key = Some(Key::from_base64(&self.pre_shared_key, "PresharedKey")?);
        }
        if !self.persistent_keepalive.trim().is_empty() {
            let keepalive = self.persistent_keepalive.trim().parse::<u16>().map_err(|_| {
                ConfigFormatError::new(format!(
                    "invalid value '{}' for PersistentKeepalive",
                    self.persistent_keepalive
                ))
            })?;
            peer.persistent_keepalive = Some(keepalive);
        }
        if !self.endpoint.trim().is_empty() {
            peer.endpoint = Some(self.endpoint.parse::<Endpoint>()?);
        }

        let allowed_ips = parse_network_list(&self.allowed_ips)?;
        if !allowed_ips.is_empty() {
            peer.allowed_ips = allowed_ips;
        }
        Ok(peer)
    }

    /// True iff `allowed_ips` is exactly the public network list text
    #[must_use]
    pub fn is_lan_excluded(&self) -> bool {
        self.allowed_ips == public_networks_joined()
    }

    /// Returns a copy routing everything
    #[must_use]
    pub fn include_lan(&self) -> Self {
        Self {
            allowed_ips: all_ips_joined(),
            ..self.clone()
        }
    }

    /// Returns a copy routing only public IPv4 space
    #[must_use]
    pub fn exclude_lan(&self) -> Self {
        Self {
            allowed_ips: join_and_trim(IPV4_PUBLIC_NETWORKS.iter().copied()),
            ..self.clone()
        }
    }
}
