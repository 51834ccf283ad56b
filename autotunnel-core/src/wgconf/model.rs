//! Canonical in-memory form of a tunnel configuration.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;

use crate::error::ConfigFormatError;

use super::key::{Key, PrivateKey};

/// `AllowedIPs` used when a peer does not specify any
pub const ALL_IPS: [&str; 2] = ["0.0.0.0/0", "::/0"];

/// Returns the universal route set as parsed networks
#[must_use]
pub fn all_ips() -> Vec<IpNet> {
    vec![
        IpNet::V4(ipnet::Ipv4Net::default()),
        IpNet::V6(ipnet::Ipv6Net::default()),
    ]
}

/// A decoded tunnel: one interface and its peers, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTunnel {
    /// The local end of the tunnel
    pub interface: Interface,
    /// Remote peers
    pub peers: Vec<Peer>,
}

impl ParsedTunnel {
    /// Host of the first peer's endpoint, if there is one
    #[must_use]
    pub fn first_endpoint_host(&self) -> Option<&str> {
        self.peers
            .first()
            .and_then(|peer| peer.endpoint.as_ref())
            .map(|endpoint| endpoint.host.as_str())
    }
}

/// The `[Interface]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Interface private key
    pub private_key: PrivateKey,
    /// Tunnel addresses with prefix length
    pub addresses: Vec<IpNet>,
    /// DNS servers
    pub dns_servers: Vec<IpAddr>,
    /// DNS search domains (non-IP `DNS` entries)
    pub dns_search_domains: Vec<String>,
    /// UDP listen port
    pub listen_port: Option<u16>,
    /// Interface MTU
    pub mtu: Option<u16>,
    /// Applications routed through the tunnel (exclusive with `excluded_applications`)
    pub included_applications: Vec<String>,
    /// Applications bypassing the tunnel
    pub excluded_applications: Vec<String>,
    /// Extended-dialect obfuscation parameters
    pub obfuscation: Obfuscation,
}

impl Interface {
    /// Creates an interface holding only a private key
    #[must_use]
    pub fn new(private_key: PrivateKey) -> Self {
        Self {
            private_key,
            addresses: Vec::new(),
            dns_servers: Vec::new(),
            dns_search_domains: Vec::new(),
            listen_port: None,
            mtu: None,
            included_applications: Vec::new(),
            excluded_applications: Vec::new(),
            obfuscation: Obfuscation::default(),
        }
    }
}

/// Junk-packet and header-obfuscation settings of the extended dialect.
///
/// All fields are optional; an all-`None` value means plain WireGuard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Obfuscation {
    /// `Jc`: junk packet count
    pub junk_packet_count: Option<u16>,
    /// `Jmin`: minimum junk packet size
    pub junk_packet_min_size: Option<u16>,
    /// `Jmax`: maximum junk packet size
    pub junk_packet_max_size: Option<u16>,
    /// `S1`: init packet junk size
    pub init_packet_junk_size: Option<u16>,
    /// `S2`: response packet junk size
    pub response_packet_junk_size: Option<u16>,
    /// `H1`: init packet magic header
    pub init_packet_magic_header: Option<u32>,
    /// `H2`: response packet magic header
    pub response_packet_magic_header: Option<u32>,
    /// `H3`: underload packet magic header
    pub underload_packet_magic_header: Option<u32>,
    /// `H4`: transport packet magic header
    pub transport_packet_magic_header: Option<u32>,
}

impl Obfuscation {
    /// Returns true if no extended parameter is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A `[Peer]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    /// Peer public key
    pub public_key: Key,
    /// Optional pre-shared key
    pub pre_shared_key: Option<Key>,
    /// Keepalive interval in seconds
    pub persistent_keepalive: Option<u16>,
    /// Remote endpoint
    pub endpoint: Option<Endpoint>,
    /// Routes sent through this peer; never empty
    pub allowed_ips: Vec<IpNet>,
}

impl Peer {
    /// Creates a peer routing everything, with no endpoint
    #[must_use]
    pub fn new(public_key: Key) -> Self {
        Self {
            public_key,
            pre_shared_key: None,
            persistent_keepalive: None,
            endpoint: None,
            allowed_ips: all_ips(),
        }
    }

    /// Returns `allowed_ips` in the joined `a, b, c` form
    #[must_use]
    pub fn allowed_ips_joined(&self) -> String {
        join_networks(&self.allowed_ips)
    }
}

/// Joins networks the way wg-quick writes list attributes
#[must_use]
pub fn join_networks(networks: &[IpNet]) -> String {
    networks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses a comma-separated CIDR list, skipping empty items
pub fn parse_network_list(value: &str) -> Result<Vec<IpNet>, ConfigFormatError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_network)
        .collect()
}

/// Parses one CIDR block; a bare address gets a host-length prefix
pub fn parse_network(value: &str) -> Result<IpNet, ConfigFormatError> {
    if let Ok(net) = IpNet::from_str(value) {
        return Ok(net);
    }
    IpAddr::from_str(value)
        .map(IpNet::from)
        .map_err(|_| ConfigFormatError::new(format!("invalid network '{value}'")))
}

/// A `host:port` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Hostname or address, without IPv6 brackets
    pub host: String,
    /// UDP port
    pub port: u16,
}

impl FromStr for Endpoint {
    type Err = ConfigFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let invalid = || ConfigFormatError::new(format!("invalid endpoint '{value}'"));

        let (host, port) = if let Some(rest) = value.strip_prefix('[') {
            let (host, after) = rest.split_once(']').ok_or_else(invalid)?;
            let port = after.strip_prefix(':').ok_or_else(invalid)?;
            if host.parse::<std::net::Ipv6Addr>().is_err() {
                return Err(invalid());
            }
            (host, port)
        } else {
            let (host, port) = value.rsplit_once(':').ok_or_else(invalid)?;
            if host.contains(':') {
                return Err(invalid());
            }
            (host, port)
        };

        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let port = port.parse::<u16>().map_err(|_| invalid())?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
