// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Attribute Extractor
//!
//! Stable textual views of a [`SockAddr`] or an [`IfAddr`], addressed by name.
//! A name that exists for some variant but not for the one at hand renders as
//! the empty string; [`ensure_known`] is there for callers that want to reject
//! names no variant has.

use ifsift_common::error::{Error, Result};
use ifsift_common::models::{IPv4Addr, IPv6Addr, IfAddr, IpAddrOps, SockAddr, SockAddrOps};

pub const COMMON_ATTRS: &[&str] = &["type", "string"];
pub const IF_ADDR_ATTRS: &[&str] = &["name", "flags"];
pub const IP_ATTRS: &[&str] = &[
    "host",
    "address",
    "port",
    "netmask",
    "network",
    "mask_bits",
    "binary",
    "hex",
    "first_usable",
    "last_usable",
    "octets",
];
pub const IPV4_ATTRS: &[&str] = &["size", "broadcast", "uint32"];
pub const IPV6_ATTRS: &[&str] = &["size", "uint128"];
pub const UNIX_ATTRS: &[&str] = &["path"];

/// Whether any variant defines `name`.
pub fn is_known(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    [
        COMMON_ATTRS,
        IF_ADDR_ATTRS,
        IP_ATTRS,
        IPV4_ATTRS,
        IPV6_ATTRS,
        UNIX_ATTRS,
    ]
    .iter()
    .any(|names| names.contains(&name.as_str()))
}

pub fn ensure_known(name: &str) -> Result<()> {
    if is_known(name) {
        Ok(())
    } else {
        Err(Error::selector(format!("unsupported attribute name {name:?}")))
    }
}

/// The attributes defined for `sa`, in display order.
pub fn sock_addr_attr_names(sa: &SockAddr) -> Vec<&'static str> {
    let specific: &[&[&str]] = match sa {
        SockAddr::IPv4(_) => &[IP_ATTRS, IPV4_ATTRS],
        SockAddr::IPv6(_) => &[IP_ATTRS, IPV6_ATTRS],
        SockAddr::Unix(_) => &[UNIX_ATTRS],
    };
    COMMON_ATTRS
        .iter()
        .chain(specific.iter().flat_map(|names| names.iter()))
        .copied()
        .collect()
}

pub fn sock_addr_attr(sa: &SockAddr, name: &str) -> String {
    let name = name.to_ascii_lowercase();
    match name.as_str() {
        "type" => return sa.kind().to_string(),
        "string" => return sa.to_string(),
        _ => {}
    }

    let value = match sa {
        SockAddr::IPv4(v4) => ip_attr(v4, &name).or_else(|| ipv4_attr(v4, &name)),
        SockAddr::IPv6(v6) => ip_attr(v6, &name).or_else(|| ipv6_attr(v6, &name)),
        SockAddr::Unix(unix) => (name == "path").then(|| unix.path().to_string()),
    };
    value.unwrap_or_default()
}

pub fn if_addr_attr(ifaddr: &IfAddr, name: &str) -> String {
    match name.to_ascii_lowercase().as_str() {
        "name" => ifaddr.interface.name.clone(),
        "flags" => ifaddr.interface.flags.to_string(),
        _ => sock_addr_attr(&ifaddr.sock_addr, name),
    }
}

fn ip_attr<T: IpAddrOps>(ip: &T, name: &str) -> Option<String> {
    let value = match name {
        "host" => ip.host_addr().to_string(),
        "address" => ip.ip().to_string(),
        "port" => ip.port().to_string(),
        "netmask" => ip.netmask_hex(),
        "network" => ip.network().to_string(),
        "mask_bits" => ip.mask_bits().to_string(),
        "binary" => ip.address_binary(),
        "hex" => ip.address_hex(),
        "first_usable" => ip.first_usable().to_string(),
        "last_usable" => ip.last_usable().to_string(),
        "octets" => ip
            .octets()
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        _ => return None,
    };
    Some(value)
}

fn ipv4_attr(ip: &IPv4Addr, name: &str) -> Option<String> {
    match name {
        "size" => Some(ip.network_size().to_string()),
        "broadcast" => Some(ip.broadcast().to_string()),
        "uint32" => Some(ip.to_u32().to_string()),
        _ => None,
    }
}

fn ipv6_attr(ip: &IPv6Addr, name: &str) -> Option<String> {
    match name {
        "size" => Some(ip.network_size()),
        "uint128" => Some(ip.to_u128().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifsift_common::models::{Interface, InterfaceFlags};

    fn sa(s: &str) -> SockAddr {
        SockAddr::parse(s).unwrap()
    }

    #[test]
    fn ipv4_attributes_should_render_network_views() {
        let ip = sa("192.168.0.1/24");
        assert_eq!(sock_addr_attr(&ip, "type"), "IPv4");
        assert_eq!(sock_addr_attr(&ip, "address"), "192.168.0.1");
        assert_eq!(sock_addr_attr(&ip, "host"), "192.168.0.1");
        assert_eq!(sock_addr_attr(&ip, "network"), "192.168.0.0/24");
        assert_eq!(sock_addr_attr(&ip, "broadcast"), "192.168.0.255");
        assert_eq!(sock_addr_attr(&ip, "netmask"), "ffffff00");
        assert_eq!(sock_addr_attr(&ip, "mask_bits"), "24");
        assert_eq!(sock_addr_attr(&ip, "size"), "256");
        assert_eq!(sock_addr_attr(&ip, "first_usable"), "192.168.0.1");
        assert_eq!(sock_addr_attr(&ip, "last_usable"), "192.168.0.254");
        assert_eq!(sock_addr_attr(&ip, "octets"), "192 168 0 1");
        assert_eq!(sock_addr_attr(&ip, "uint32"), "3232235521");
        assert_eq!(sock_addr_attr(&ip, "hex"), "c0a80001");
    }

    #[test]
    fn ipv6_attributes_should_use_big_values() {
        let ip = sa("2001:db8::1/64");
        assert_eq!(sock_addr_attr(&ip, "type"), "IPv6");
        assert_eq!(sock_addr_attr(&ip, "size"), "18446744073709551616");
        assert_eq!(sock_addr_attr(&ip, "network"), "2001:db8::/64");
        assert_eq!(
            sock_addr_attr(&ip, "uint128"),
            "42540766411282592856903984951653826561"
        );
        assert_eq!(sock_addr_attr(&ip, "broadcast"), "");
    }

    #[test]
    fn unix_attributes_should_expose_the_path() {
        let unix = sa("/var/run/docker.sock");
        assert_eq!(sock_addr_attr(&unix, "type"), "UNIX");
        assert_eq!(sock_addr_attr(&unix, "path"), "/var/run/docker.sock");
        assert_eq!(sock_addr_attr(&unix, "string"), "\"/var/run/docker.sock\"");
        assert_eq!(sock_addr_attr(&unix, "address"), "");
    }

    #[test]
    fn ifaddr_attributes_should_cover_the_interface() {
        let ifaddr = IfAddr::new(
            sa("10.1.2.3/8"),
            Interface {
                index: 2,
                name: "eth0".to_string(),
                mtu: 1500,
                flags: InterfaceFlags::UP | InterfaceFlags::BROADCAST,
                hardware_addr: None,
            },
        );
        assert_eq!(if_addr_attr(&ifaddr, "name"), "eth0");
        assert_eq!(if_addr_attr(&ifaddr, "flags"), "up|broadcast");
        assert_eq!(if_addr_attr(&ifaddr, "Address"), "10.1.2.3");
    }

    #[test]
    fn known_names_should_span_every_variant() {
        assert!(is_known("uint128"));
        assert!(is_known("PATH"));
        assert!(!is_known("colour"));
        assert!(ensure_known("colour").is_err());
    }

    #[test]
    fn attr_names_should_follow_the_variant() {
        let names = sock_addr_attr_names(&sa("/tmp/x.sock"));
        assert_eq!(names, vec!["type", "string", "path"]);

        let names = sock_addr_attr_names(&sa("::1"));
        assert_eq!(names.last(), Some(&"uint128"));
        assert!(!names.contains(&"broadcast"));
    }
}
