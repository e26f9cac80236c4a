// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Unicast and routable beyond the link: not unspecified, loopback, multicast,
/// link-local, or the IPv4 limited broadcast.
pub fn is_global_unicast(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !v4.is_unspecified()
                && !v4.is_loopback()
                && !v4.is_multicast()
                && !v4.is_link_local()
                && !v4.is_broadcast()
        }
        IpAddr::V6(v6) => {
            !v6.is_unspecified()
                && !v6.is_loopback()
                && !v6.is_multicast()
                && !is_v6_link_local_unicast(v6)
        }
    }
}

/// `ff01::/16`. IPv4 has no interface-local scope.
pub fn is_interface_local_multicast(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(_) => false,
        IpAddr::V6(v6) => v6.segments()[0] & 0xff0f == 0xff01,
    }
}

/// `224.0.0.0/24` or `ff02::/16`.
pub fn is_link_local_multicast(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_v4_link_local_multicast(v4),
        IpAddr::V6(v6) => v6.segments()[0] & 0xff0f == 0xff02,
    }
}

/// `169.254.0.0/16` or `fe80::/10`.
pub fn is_link_local_unicast(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_link_local(),
        IpAddr::V6(v6) => is_v6_link_local_unicast(v6),
    }
}

pub fn is_unspecified(ip: &IpAddr) -> bool {
    ip.is_unspecified()
}

fn is_v4_link_local_multicast(v4: &Ipv4Addr) -> bool {
    let [a, b, c, _] = v4.octets();
    a == 224 && b == 0 && c == 0
}

fn is_v6_link_local_unicast(v6: &Ipv6Addr) -> bool {
    v6.segments()[0] & 0xffc0 == 0xfe80
}
