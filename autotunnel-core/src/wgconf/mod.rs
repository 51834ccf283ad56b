//! Tunnel configuration dialects.
//!
//! Both dialects share the wg-quick INI layout:
//! - [`Dialect::Baseline`] - plain WireGuard, interoperable with common tooling
//! - [`Dialect::Extended`] - AmneziaWG, adding junk-packet and header
//!   obfuscation attributes to `[Interface]`
//!
//! Baseline text always parses as extended. Rendering to the baseline dialect
//! drops the extended attributes, so every imported tunnel can be stored in
//! both forms.

mod key;
mod model;
mod parser;
mod render;

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigFormatError;

pub use key::{KEY_LEN, Key, PrivateKey};
pub use model::{
    ALL_IPS, Endpoint, Interface, Obfuscation, ParsedTunnel, Peer, all_ips, join_networks,
    parse_network, parse_network_list,
};
pub use parser::{parse, parse_bytes};
pub use render::render;

/// Configuration text dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Plain WireGuard wg-quick format
    Baseline,
    /// AmneziaWG format (superset of baseline)
    #[default]
    Extended,
}

impl Dialect {
    /// Returns true if the dialect carries obfuscation attributes
    #[must_use]
    pub const fn supports_obfuscation(self) -> bool {
        matches!(self, Self::Extended)
    }

    /// Short name used in settings and the CLI
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Extended => "extended",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "baseline" | "wg" | "wireguard" => Ok(Self::Baseline),
            "extended" | "awg" | "amnezia" => Ok(Self::Extended),
            _ => Err(()),
        }
    }
}

impl ParsedTunnel {
    /// Parses text in the given dialect
    pub fn parse(text: &str, dialect: Dialect) -> Result<Self, ConfigFormatError> {
        parse(text, dialect)
    }

    /// Parses text with the extended parser, which accepts both dialects
    pub fn parse_extended(text: &str) -> Result<Self, ConfigFormatError> {
        parse(text, Dialect::Extended)
    }

    /// Renders the tunnel in the given dialect
    #[must_use]
    pub fn render(&self, dialect: Dialect) -> String {
        render(self, dialect)
    }

    /// Renders baseline (WireGuard) text
    #[must_use]
    pub fn to_wg_quick(&self) -> String {
        render(self, Dialect::Baseline)
    }

    /// Renders extended (AmneziaWG) text
    #[must_use]
    pub fn to_am_quick(&self) -> String {
        render(self, Dialect::Extended)
    }
}
