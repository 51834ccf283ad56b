//! wg-quick text rendering.

use std::fmt::Write;

use super::Dialect;
use super::model::{Interface, Obfuscation, ParsedTunnel, Peer, join_networks};

/// Renders a tunnel as configuration text in the given dialect.
///
/// Extended-only attributes are omitted from baseline output.
#[must_use]
pub fn render(tunnel: &ParsedTunnel, dialect: Dialect) -> String {
    let mut out = String::new();
    write_interface(&mut out, &tunnel.interface, dialect);
    for peer in &tunnel.peers {
        out.push('\n');
        write_peer(&mut out, peer);
    }
    out
}

fn write_interface(out: &mut String, interface: &Interface, dialect: Dialect) {
    out.push_str("[Interface]\n");
    if !interface.addresses.is_empty() {
        attribute(out, "Address", join_networks(&interface.addresses));
    }
    let dns: Vec<String> = interface
        .dns_servers
        .iter()
        .map(ToString::to_string)
        .chain(interface.dns_search_domains.iter().cloned())
        .collect();
    if !dns.is_empty() {
        attribute(out, "DNS", dns.join(", "));
    }
    if !interface.excluded_applications.is_empty() {
        attribute(
            out,
            "ExcludedApplications",
            interface.excluded_applications.join(", "),
        );
    }
    if !interface.included_applications.is_empty() {
        attribute(
            out,
            "IncludedApplications",
            interface.included_applications.join(", "),
        );
    }
    if let Some(port) = interface.listen_port {
        attribute(out, "ListenPort", port);
    }
    if let Some(mtu) = interface.mtu {
        attribute(out, "MTU", mtu);
    }
    attribute(out, "PrivateKey", interface.private_key.to_base64());

    if dialect.supports_obfuscation() {
        write_obfuscation(out, &interface.obfuscation);
    }
}

fn write_obfuscation(out: &mut String, obfuscation: &Obfuscation) {
    let sizes = [
        ("Jc", obfuscation.junk_packet_count),
        ("Jmin", obfuscation.junk_packet_min_size),
        ("Jmax", obfuscation.junk_packet_max_size),
        ("S1", obfuscation.init_packet_junk_size),
        ("S2", obfuscation.response_packet_junk_size),
    ];
    for (name, value) in sizes {
        if let Some(value) = value {
            attribute(out, name, value);
        }
    }

    let headers = [
        ("H1", obfuscation.init_packet_magic_header),
        ("H2", obfuscation.response_packet_magic_header),
        ("H3", obfuscation.underload_packet_magic_header),
        ("H4", obfuscation.transport_packet_magic_header),
    ];
    for (name, value) in headers {
        if let Some(value) = value {
            attribute(out, name, value);
        }
    }
}

fn write_peer(out: &mut String, peer: &Peer) {
    out.push_str("[Peer]\n");
    attribute(out, "AllowedIPs", peer.allowed_ips_joined());
    if let Some(ref endpoint) = peer.endpoint {
        attribute(out, "Endpoint", endpoint);
    }
    if let Some(keepalive) = peer.persistent_keepalive {
        attribute(out, "PersistentKeepalive", keepalive);
    }
    if let Some(ref psk) = peer.pre_shared_key {
        attribute(out, "PresharedKey", psk.to_base64());
    }
    attribute(out, "PublicKey", peer.public_key.to_base64());
}

fn attribute(out: &mut String, name: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "{name} = {value}");
}
