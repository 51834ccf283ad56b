//! Property-based tests for the configuration dialects
//!
//! Tests render/parse round trips in both dialects and that baseline output
//! only ever loses the extended attributes.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use autotunnel_core::wgconf::{
    Dialect, Endpoint, Interface, Key, Obfuscation, ParsedTunnel, Peer, PrivateKey,
};
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use proptest::prelude::*;

fn arb_network() -> impl Strategy<Value = IpNet> {
    prop_oneof![
        (any::<u32>(), 0u8..=32).prop_map(|(addr, prefix)| {
            IpNet::V4(Ipv4Net::new(Ipv4Addr::from(addr), prefix).expect("valid prefix"))
        }),
        (any::<u128>(), 0u8..=128).prop_map(|(addr, prefix)| {
            IpNet::V6(Ipv6Net::new(Ipv6Addr::from(addr), prefix).expect("valid prefix"))
        }),
    ]
}

fn arb_endpoint() -> impl Strategy<Value = Endpoint> {
    let host = prop_oneof![
        "[a-z][a-z0-9-]{0,10}(\\.[a-z]{2,5}){1,2}",
        any::<u32>().prop_map(|a| Ipv4Addr::from(a).to_string()),
        any::<u128>().prop_map(|a| Ipv6Addr::from(a).to_string()),
    ];
    (host, any::<u16>()).prop_map(|(host, port)| Endpoint { host, port })
}

fn arb_obfuscation() -> impl Strategy<Value = Obfuscation> {
    (
        prop::option::of(any::<u16>()),
        prop::option::of((any::<u16>(), any::<u16>())),
        prop::option::of(any::<u16>()),
        prop::option::of(any::<u16>()),
        prop::array::uniform4(prop::option::of(any::<u32>())),
    )
        .prop_map(|(jc, junk_range, s1, s2, [h1, h2, h3, h4])| {
            let (jmin, jmax) = junk_range
                .map(|(a, b)| (Some(a.min(b)), Some(a.max(b))))
                .unwrap_or_default();
            Obfuscation {
                junk_packet_count: jc,
                junk_packet_min_size: jmin,
                junk_packet_max_size: jmax,
                init_packet_junk_size: s1,
                response_packet_junk_size: s2,
                init_packet_magic_header: h1,
                response_packet_magic_header: h2,
                underload_packet_magic_header: h3,
                transport_packet_magic_header: h4,
            }
        })
}

fn arb_interface() -> impl Strategy<Value = Interface> {
    (
        any::<[u8; 32]>(),
        prop::collection::vec(arb_network(), 0..4),
        prop::collection::vec(any::<u32>().prop_map(|a| IpAddr::V4(Ipv4Addr::from(a))), 0..3),
        prop::collection::vec("[a-z]{1,8}\\.(lan|corp)", 0..3),
        (prop::option::of(any::<u16>()), prop::option::of(576u16..9000)),
        (any::<bool>(), prop::collection::vec("[a-z][a-z0-9_.]{0,20}", 0..3)),
        arb_obfuscation(),
    )
        .prop_map(
            |(key, addresses, dns_servers, dns_search_domains, (listen_port, mtu), (included, apps), obfuscation)| {
                let mut interface = Interface::new(PrivateKey::from(Key::from_bytes(key)));
                interface.addresses = addresses;
                interface.dns_servers = dns_servers;
                interface.dns_search_domains = dns_search_domains;
                interface.listen_port = listen_port;
                interface.mtu = mtu;
                if included {
                    interface.included_applications = apps;
                } else {
                    interface.excluded_applications = apps;
                }
                interface.obfuscation = obfuscation;
                interface
            },
        )
}

fn arb_peer() -> impl Strategy<Value = Peer> {
    (
        any::<[u8; 32]>(),
        prop::option::of(any::<[u8; 32]>()),
        prop::option::of(any::<u16>()),
        prop::option::of(arb_endpoint()),
        prop::collection::vec(arb_network(), 1..5),
    )
        .prop_map(|(key, psk, keepalive, endpoint, allowed_ips)| Peer {
            public_key: Key::from_bytes(key),
            pre_shared_key: psk.map(Key::from_bytes),
            persistent_keepalive: keepalive,
            endpoint,
            allowed_ips,
        })
}

fn arb_tunnel() -> impl Strategy<Value = ParsedTunnel> {
    (arb_interface(), prop::collection::vec(arb_peer(), 0..4))
        .prop_map(|(interface, peers)| ParsedTunnel { interface, peers })
}

proptest! {
    /// Property: extended rendering is lossless
    #[test]
    fn extended_round_trip(tunnel in arb_tunnel()) {
        let text = tunnel.to_am_quick();
        let parsed = ParsedTunnel::parse(&text, Dialect::Extended).expect("rendered text parses");
        prop_assert_eq!(parsed, tunnel);
    }

    /// Property: baseline rendering keeps everything except obfuscation
    #[test]
    fn baseline_round_trip_drops_only_obfuscation(tunnel in arb_tunnel()) {
        let text = tunnel.to_wg_quick();
        let parsed = ParsedTunnel::parse(&text, Dialect::Baseline).expect("rendered text parses");

        let mut expected = tunnel.clone();
        expected.interface.obfuscation = Obfuscation::default();
        prop_assert_eq!(parsed, expected);
    }

    /// Property: baseline text is always valid extended text
    #[test]
    fn baseline_text_parses_as_extended(tunnel in arb_tunnel()) {
        let text = tunnel.to_wg_quick();
        let as_extended = ParsedTunnel::parse_extended(&text).expect("extended accepts baseline");
        let as_baseline = ParsedTunnel::parse(&text, Dialect::Baseline).expect("baseline parses");
        prop_assert_eq!(as_extended, as_baseline);
    }

    /// Property: rendering is a fixed point after one parse
    #[test]
    fn render_is_stable(tunnel in arb_tunnel()) {
        let once = tunnel.to_am_quick();
        let twice = ParsedTunnel::parse_extended(&once).expect("parses").to_am_quick();
        prop_assert_eq!(once, twice);
    }

    /// Property: key names are matched without regard to case
    #[test]
    fn attribute_names_are_case_insensitive(tunnel in arb_tunnel()) {
        let text = tunnel.to_am_quick();
        let shouted: String = text
            .lines()
            .map(|line| match line.split_once(" = ") {
                Some((key, value)) => format!("{} = {value}\n", key.to_uppercase()),
                None => format!("{}\n", line.to_uppercase()),
            })
            .collect();
        let parsed = ParsedTunnel::parse_extended(&shouted).expect("upper-case keys parse");
        prop_assert_eq!(parsed, tunnel);
    }
}
