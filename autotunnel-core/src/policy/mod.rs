//! LAN routing policy for tunnel peers.
//!
//! A peer either routes everything ([`ALL_IPS`]) or everything except local
//! networks ([`IPV4_PUBLIC_NETWORKS`]). The state check is textual: a peer is
//! LAN-excluded only when its joined `AllowedIPs` equals the joined public
//! network list exactly.
//!
//! The table deliberately differs from the 30-block list older AutoTunnel
//! releases wrote, which kept loopback and link-local space in the tunnel.
//! Peers saved with that list read as not LAN-excluded here until they are
//! toggled again.

mod proxy;

use std::sync::LazyLock;

use ipnet::IpNet;

use crate::wgconf::{ALL_IPS, ParsedTunnel, Peer, all_ips, join_networks, parse_network};

pub use proxy::PeerProxy;

/// IPv4 space minus RFC1918, loopback, link-local and multicast/reserved.
///
/// Blocks are disjoint and listed in address order.
pub static IPV4_PUBLIC_NETWORKS: [&str; 44] = [
    "0.0.0.0/5",
    "8.0.0.0/7",
    "11.0.0.0/8",
    "12.0.0.0/6",
    "16.0.0.0/4",
    "32.0.0.0/3",
    "64.0.0.0/3",
    "96.0.0.0/4",
    "112.0.0.0/5",
    "120.0.0.0/6",
    "124.0.0.0/7",
    "126.0.0.0/8",
    "128.0.0.0/3",
    "160.0.0.0/5",
    "168.0.0.0/8",
    "169.0.0.0/9",
    "169.128.0.0/10",
    "169.192.0.0/11",
    "169.224.0.0/12",
    "169.240.0.0/13",
    "169.248.0.0/14",
    "169.252.0.0/15",
    "169.255.0.0/16",
    "170.0.0.0/7",
    "172.0.0.0/12",
    "172.32.0.0/11",
    "172.64.0.0/10",
    "172.128.0.0/9",
    "173.0.0.0/8",
    "174.0.0.0/7",
    "176.0.0.0/4",
    "192.0.0.0/9",
    "192.128.0.0/11",
    "192.160.0.0/13",
    "192.169.0.0/16",
    "192.170.0.0/15",
    "192.172.0.0/14",
    "192.176.0.0/12",
    "192.192.0.0/10",
    "193.0.0.0/8",
    "194.0.0.0/7",
    "196.0.0.0/6",
    "200.0.0.0/5",
    "208.0.0.0/4",
];

/// Ranges carved out of [`IPV4_PUBLIC_NETWORKS`]
pub static IPV4_LOCAL_NETWORKS: [&str; 6] = [
    "10.0.0.0/8",
    "127.0.0.0/8",
    "169.254.0.0/16",
    "172.16.0.0/12",
    "192.168.0.0/16",
    "224.0.0.0/3",
];

static PUBLIC_NETWORKS: LazyLock<Vec<IpNet>> = LazyLock::new(|| {
    IPV4_PUBLIC_NETWORKS
        .iter()
        .filter_map(|block| parse_network(block).ok())
        .collect()
});

static PUBLIC_NETWORKS_JOINED: LazyLock<String> =
    LazyLock::new(|| join_and_trim(IPV4_PUBLIC_NETWORKS.iter().copied()));

/// Joins CIDR strings with `", "` after trimming each item
pub fn join_and_trim<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(", ")
        .trim()
        .to_string()
}

/// The public network list as parsed blocks
#[must_use]
pub fn public_networks() -> &'static [IpNet] {
    &PUBLIC_NETWORKS
}

/// The public network list in its serialized form
#[must_use]
pub fn public_networks_joined() -> &'static str {
    &PUBLIC_NETWORKS_JOINED
}

/// The universal route set in its serialized form
#[must_use]
pub fn all_ips_joined() -> String {
    join_and_trim(ALL_IPS)
}

impl Peer {
    /// Returns a copy routing only public IPv4 space
    #[must_use]
    pub fn exclude_lan(&self) -> Self {
        Self {
            allowed_ips: public_networks().to_vec(),
            ..self.clone()
        }
    }

    /// Returns a copy routing everything
    #[must_use]
    pub fn include_lan(&self) -> Self {
        Self {
            allowed_ips: all_ips(),
            ..self.clone()
        }
    }

    /// True iff `allowed_ips` serializes to exactly the public network list
    #[must_use]
    pub fn is_lan_excluded(&self) -> bool {
        join_networks(&self.allowed_ips) == public_networks_joined()
    }
}

impl ParsedTunnel {
    /// Applies [`Peer::exclude_lan`] to every peer
    #[must_use]
    pub fn exclude_lan_all(&self) -> Self {
        Self {
            interface: self.interface.clone(),
            peers: self.peers.iter().map(Peer::exclude_lan).collect(),
        }
    }

    /// Applies [`Peer::include_lan`] to every peer
    #[must_use]
    pub fn include_lan_all(&self) -> Self {
        Self {
            interface: self.interface.clone(),
            peers: self.peers.iter().map(Peer::include_lan).collect(),
        }
    }

    /// True if there is at least one peer and every peer is LAN-excluded
    #[must_use]
    pub fn is_lan_excluded(&self) -> bool {
        !self.peers.is_empty() && self.peers.iter().all(Peer::is_lan_excluded)
    }
}
