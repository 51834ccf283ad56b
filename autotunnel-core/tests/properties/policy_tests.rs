//! Property-based tests for the LAN routing transforms

use std::net::{Ipv4Addr, Ipv6Addr};

use autotunnel_core::policy::{PeerProxy, all_ips_joined, public_networks, public_networks_joined};
use autotunnel_core::wgconf::{Key, Peer};
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

fn arb_peer() -> impl Strategy<Value = Peer> {
    (
        any::<[u8; 32]>(),
        prop::collection::vec(arb_network(), 1..6),
        prop::option::of(any::<u16>()),
    )
        .prop_map(|(key, allowed_ips, keepalive)| {
            let mut peer = Peer::new(Key::from_bytes(key));
            peer.allowed_ips = allowed_ips;
            peer.persistent_keepalive = keepalive;
            peer
        })
}

/// Returns true if the IPv4 address falls inside one of the public blocks
fn is_public(addr: Ipv4Addr) -> bool {
    public_networks().iter().any(|net| net.contains(&std::net::IpAddr::V4(addr)))
}

proptest! {
    /// Property: after exclude_lan the peer is LAN-excluded
    #[test]
    fn exclude_then_check(peer in arb_peer()) {
        let excluded = peer.exclude_lan();
        prop_assert!(excluded.is_lan_excluded());
        prop_assert_eq!(excluded.allowed_ips_joined(), public_networks_joined());
    }

    /// Property: after include_lan the peer routes everything
    #[test]
    fn include_then_check(peer in arb_peer()) {
        let included = peer.include_lan();
        prop_assert!(!included.is_lan_excluded());
        prop_assert_eq!(included.allowed_ips_joined(), all_ips_joined());
    }

    /// Property: the toggles only touch allowed IPs and are idempotent
    #[test]
    fn toggles_keep_other_fields(peer in arb_peer()) {
        let excluded = peer.exclude_lan();
        prop_assert_eq!(&excluded.public_key, &peer.public_key);
        prop_assert_eq!(excluded.persistent_keepalive, peer.persistent_keepalive);
        prop_assert_eq!(excluded.exclude_lan(), excluded.clone());
        prop_assert_eq!(peer.include_lan().include_lan(), peer.include_lan());
    }

    /// Property: the edit form agrees with the parsed form
    #[test]
    fn proxy_matches_peer(peer in arb_peer(), exclude in any::<bool>()) {
        let peer = if exclude { peer.exclude_lan() } else { peer };
        let proxy = PeerProxy::from(&peer);
        prop_assert_eq!(proxy.is_lan_excluded(), peer.is_lan_excluded());
        prop_assert_eq!(proxy.to_peer().expect("proxy converts back"), peer);
    }

    /// Property: private, loopback, link-local and multicast addresses are
    /// outside the public set; everything else is inside
    #[test]
    fn public_set_partitions_ipv4(addr in any::<u32>()) {
        let addr = Ipv4Addr::from(addr);
        let local = addr.is_private()
            || addr.is_loopback()
            || addr.is_link_local()
            || addr.octets()[0] >= 224;
        prop_assert_eq!(is_public(addr), !local);
    }
}
