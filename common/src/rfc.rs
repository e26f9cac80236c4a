// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # RFC Classifier
//!
//! A process-wide table mapping RFC numbers to the special-purpose networks
//! they define. The table is built on first use and never changes afterwards.
//!
//! RFC 6890 doubles as this library's definition of "private": an address in
//! any of its blocks is not a public, globally routed address.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::models::ipv4::IPv4Addr;
use crate::models::ipv6::IPv6Addr;
use crate::models::sockaddr::{SockAddr, SockAddrOps};

pub type RfcTable = BTreeMap<u32, Vec<SockAddr>>;

/// RFC used for the "private" sort key and the private/public interface sources.
pub const PRIVATE_RFC: u32 = 6890;

/// Every known RFC, ascending by number.
pub fn known_rfcs() -> &'static RfcTable {
    static TABLE: OnceLock<RfcTable> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

/// Blocks a router must not forward.
///
/// Kept apart from [`known_rfcs`] because it is not an RFC of its own.
pub fn forwarding_blacklist() -> &'static [SockAddr] {
    static BLACKLIST: OnceLock<Vec<SockAddr>> = OnceLock::new();
    BLACKLIST.get_or_init(|| {
        vec![
            v4([0, 0, 0, 0], 8),
            v4([127, 0, 0, 0], 8),
            v4([169, 254, 0, 0], 16),
            v4([192, 0, 0, 0], 24),
            v4([192, 0, 2, 0], 24),
            v4([198, 51, 100, 0], 24),
            v4([203, 0, 113, 0], 24),
            v4([240, 0, 0, 0], 4),
            v4([255, 255, 255, 255], 32),
            v6([0, 0, 0, 0, 0, 0, 0, 1], 128),
            v6([0, 0, 0, 0, 0, 0, 0, 0], 128),
            v6([0, 0, 0, 0, 0, 0xffff, 0, 0], 96),
            v6([0x2001, 0xdb8, 0, 0, 0, 0, 0, 0], 32),
            v6([0x2001, 0x10, 0, 0, 0, 0, 0, 0], 28),
            v6([0xfe80, 0, 0, 0, 0, 0, 0, 0], 10),
        ]
    })
}

/// Whether `sa` lies in any network of RFC `rfc`.
pub fn is_rfc(rfc: u32, sa: &SockAddr) -> Result<bool> {
    let networks = known_rfcs().get(&rfc).ok_or(Error::Rfc(rfc))?;
    Ok(networks.iter().any(|net| net.contains(sa)))
}

/// Like [`is_rfc`], with unknown RFCs containing nothing.
pub fn in_rfc(rfc: u32, sa: &SockAddr) -> bool {
    is_rfc(rfc, sa).unwrap_or(false)
}

/// IP addresses outside the forwarding blacklist. UNIX sockets are never forwardable.
pub fn is_forwardable(sa: &SockAddr) -> bool {
    sa.is_ip() && !forwarding_blacklist().iter().any(|net| net.contains(sa))
}

/// The RFCs whose networks contain `sa`, ascending.
pub fn rfcs_of(sa: &SockAddr) -> Vec<u32> {
    known_rfcs()
        .iter()
        .filter(|(_, nets)| nets.iter().any(|net| net.contains(sa)))
        .map(|(rfc, _)| *rfc)
        .collect()
}

fn v4(octets: [u8; 4], bits: u8) -> SockAddr {
    SockAddr::IPv4(IPv4Addr::from_octets(octets, bits))
}

fn v6(segments: [u16; 8], bits: u8) -> SockAddr {
    SockAddr::IPv6(IPv6Addr::from_segments(segments, bits))
}

fn build_table() -> RfcTable {
    let mut table = RfcTable::new();

    // Broadcasting Internet Datagrams
    table.insert(919, vec![v4([255, 255, 255, 255], 32)]);

    // Host Extensions for IP Multicasting
    table.insert(1112, vec![v4([224, 0, 0, 0], 4)]);

    // Requirements for Internet Hosts, "this network" and loopback
    table.insert(1122, vec![v4([0, 0, 0, 0], 8), v4([127, 0, 0, 0], 8)]);

    // Address Allocation for Private Internets
    table.insert(
        1918,
        vec![
            v4([10, 0, 0, 0], 8),
            v4([172, 16, 0, 0], 12),
            v4([192, 168, 0, 0], 16),
        ],
    );

    // Benchmarking Methodology for Network Interconnect Devices
    table.insert(2544, vec![v4([198, 18, 0, 0], 15)]);

    // Stateless IP/ICMP Translation Algorithm
    table.insert(2765, vec![v6([0, 0, 0, 0, 0, 0xffff, 0, 0], 96)]);

    // Initial IPv6 Sub-TLA ID Assignments, the superblock
    table.insert(2928, vec![v6([0x2001, 0, 0, 0, 0, 0, 0, 0], 16)]);

    // 6to4
    table.insert(3056, vec![v6([0x2002, 0, 0, 0, 0, 0, 0, 0], 16)]);

    // 6to4 relay anycast, IPv4 and IPv6 forms
    table.insert(
        3068,
        vec![
            v4([192, 88, 99, 0], 24),
            v6([0x2002, 0xc058, 0x6301, 0, 0, 0, 0, 0], 120),
        ],
    );

    // IANA Guidelines for IPv4 Multicast Address Assignments
    table.insert(3171, vec![v4([224, 0, 0, 0], 4)]);

    // Special-Use IPv4 Addresses
    table.insert(
        3330,
        vec![
            v4([0, 0, 0, 0], 8),
            v4([10, 0, 0, 0], 8),
            v4([127, 0, 0, 0], 8),
            v4([169, 254, 0, 0], 16),
            v4([172, 16, 0, 0], 12),
            v4([192, 0, 2, 0], 24),
            v4([192, 88, 99, 0], 24),
            v4([192, 168, 0, 0], 16),
            v4([198, 18, 0, 0], 15),
            v4([224, 0, 0, 0], 4),
            v4([240, 0, 0, 0], 4),
        ],
    );

    // IPv6 Address Prefix Reserved for Documentation
    table.insert(3849, vec![v6([0x2001, 0xdb8, 0, 0, 0, 0, 0, 0], 32)]);

    // Dynamic Configuration of IPv4 Link-Local Addresses
    table.insert(3927, vec![v4([169, 254, 0, 0], 16)]);

    // Application Aspects of IPv6 Transition
    table.insert(4038, vec![v6([0, 0, 0, 0, 0, 0xffff, 0, 0], 96)]);

    // Unique Local IPv6 Unicast Addresses
    table.insert(4193, vec![v6([0xfc00, 0, 0, 0, 0, 0, 0, 0], 7)]);

    // IP Version 6 Addressing Architecture
    table.insert(
        4291,
        vec![
            v6([0, 0, 0, 0, 0, 0, 0, 0], 128),
            v6([0, 0, 0, 0, 0, 0, 0, 1], 128),
            v6([0, 0, 0, 0, 0, 0, 0, 0], 96),
            v6([0, 0, 0, 0, 0, 0xffff, 0, 0], 96),
            v6([0xfe80, 0, 0, 0, 0, 0, 0, 0], 10),
            v6([0xfec0, 0, 0, 0, 0, 0, 0, 0], 10),
            v6([0xff00, 0, 0, 0, 0, 0, 0, 0], 8),
        ],
    );

    // Teredo
    table.insert(4380, vec![v6([0x2001, 0, 0, 0, 0, 0, 0, 0], 32)]);

    // IANA Special Purpose IPv6 Address Block
    table.insert(4773, vec![v6([0x2001, 0, 0, 0, 0, 0, 0, 0], 23)]);

    // ORCHID
    table.insert(4843, vec![v6([0x2001, 0x10, 0, 0, 0, 0, 0, 0], 28)]);

    // IPv6 Benchmarking Methodology
    table.insert(5180, vec![v6([0x2001, 0x200, 0, 0, 0, 0, 0, 0], 48)]);

    // Special Use IPv4 Addresses: TEST-NET-1..3 and benchmarking
    table.insert(
        5735,
        vec![
            v4([192, 0, 2, 0], 24),
            v4([198, 51, 100, 0], 24),
            v4([203, 0, 113, 0], 24),
            v4([198, 18, 0, 0], 15),
        ],
    );

    // IPv4 Address Blocks Reserved for Documentation
    table.insert(
        5737,
        vec![
            v4([192, 0, 2, 0], 24),
            v4([198, 51, 100, 0], 24),
            v4([203, 0, 113, 0], 24),
        ],
    );

    // IPv6 Addressing of IPv4/IPv6 Translators, well-known prefix
    table.insert(6052, vec![v6([0x64, 0xff9b, 0, 0, 0, 0, 0, 0], 96)]);

    // Dual-Stack Lite
    table.insert(6333, vec![v4([192, 0, 0, 0], 29)]);

    // Shared Address Space
    table.insert(6598, vec![v4([100, 64, 0, 0], 10)]);

    // A Discard Prefix for IPv6
    table.insert(6666, vec![v6([0x100, 0, 0, 0, 0, 0, 0, 0], 64)]);

    // Special-Purpose IP Address Registries
    table.insert(
        6890,
        vec![
            v4([0, 0, 0, 0], 8),
            v4([10, 0, 0, 0], 8),
            v4([100, 64, 0, 0], 10),
            v4([127, 0, 0, 0], 8),
            v4([169, 254, 0, 0], 16),
            v4([172, 16, 0, 0], 12),
            v4([192, 0, 0, 0], 24),
            v4([192, 0, 0, 0], 29),
            v4([192, 0, 2, 0], 24),
            v4([192, 88, 99, 0], 24),
            v4([192, 168, 0, 0], 16),
            v4([198, 18, 0, 0], 15),
            v4([198, 51, 100, 0], 24),
            v4([203, 0, 113, 0], 24),
            v4([240, 0, 0, 0], 4),
            v4([255, 255, 255, 255], 32),
            v6([0, 0, 0, 0, 0, 0, 0, 1], 128),
            v6([0, 0, 0, 0, 0, 0, 0, 0], 128),
            v6([0x64, 0xff9b, 0, 0, 0, 0, 0, 0], 96),
            v6([0, 0, 0, 0, 0, 0xffff, 0, 0], 96),
            v6([0x100, 0, 0, 0, 0, 0, 0, 0], 64),
            v6([0x2001, 0, 0, 0, 0, 0, 0, 0], 23),
            v6([0x2001, 0, 0, 0, 0, 0, 0, 0], 32),
            v6([0x2001, 0x2, 0, 0, 0, 0, 0, 0], 48),
            v6([0x2001, 0xdb8, 0, 0, 0, 0, 0, 0], 32),
            v6([0x2001, 0x10, 0, 0, 0, 0, 0, 0], 28),
            v6([0x2002, 0, 0, 0, 0, 0, 0, 0], 16),
            v6([0xfc00, 0, 0, 0, 0, 0, 0, 0], 7),
            v6([0xfe80, 0, 0, 0, 0, 0, 0, 0], 10),
        ],
    );

    // IPv4 Service Continuity Prefix
    table.insert(7335, vec![v4([192, 0, 0, 0], 29)]);

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sa(s: &str) -> SockAddr {
        SockAddr::parse(s).unwrap()
    }

    #[test]
    fn known_rfcs_should_list_every_table() {
        let table = known_rfcs();
        assert_eq!(table.len(), 28);
        for rfc in [
            1112, 1918, 2544, 2765, 2928, 3056, 3068, 3171, 3330, 4038, 4193, 4291, 4773, 5180,
            5735, 6598, 6666, 6890,
        ] {
            assert!(table.contains_key(&rfc), "RFC {rfc} is missing");
        }
        let numbers: Vec<u32> = table.keys().copied().collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn is_rfc_should_classify_private_ranges() {
        assert!(is_rfc(1918, &sa("10.1.2.3")).unwrap());
        assert!(!is_rfc(1918, &sa("8.8.8.8")).unwrap());
        assert!(is_rfc(6890, &sa("::1")).unwrap());
        assert!(is_rfc(6598, &sa("100.64.1.1")).unwrap());
        assert!(is_rfc(4193, &sa("fd00::1")).unwrap());
        assert!(!is_rfc(4193, &sa("2001:4860::1")).unwrap());
    }

    #[test]
    fn unknown_rfc_should_be_an_error() {
        assert!(matches!(is_rfc(1, &sa("10.0.0.1")), Err(Error::Rfc(1))));
        assert!(!in_rfc(1, &sa("10.0.0.1")));
    }

    #[test]
    fn unix_sockets_should_belong_nowhere() {
        let unix = sa("/tmp/s");
        assert!(rfcs_of(&unix).is_empty());
        assert!(!is_forwardable(&unix));
    }

    #[test]
    fn forwardable_should_exclude_blacklisted_blocks() {
        assert!(is_forwardable(&sa("10.0.0.1")));
        assert!(is_forwardable(&sa("8.8.8.8")));
        assert!(!is_forwardable(&sa("127.0.0.1")));
        assert!(!is_forwardable(&sa("fe80::1")));
        assert!(!is_forwardable(&sa("255.255.255.255")));
    }

    #[test]
    fn rfcs_of_should_collect_every_match() {
        assert_eq!(rfcs_of(&sa("192.168.0.1")), vec![1918, 3330, 6890]);
    }

    proptest! {
        #[test]
        fn is_rfc_should_agree_with_table_membership(addr in any::<u32>()) {
            let ip = SockAddr::IPv4(IPv4Addr::from_parts(addr, 32, 0));
            for (rfc, nets) in known_rfcs() {
                let expected = nets.iter().any(|n| n.contains(&ip));
                prop_assert_eq!(is_rfc(*rfc, &ip).unwrap(), expected);
            }
        }
    }
}
