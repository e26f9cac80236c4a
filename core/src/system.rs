// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Host Interface Repository
//!
//! The production [`InterfaceRepository`]. Enumeration goes through
//! `pnet::datalink::interfaces`, which asks the kernel for every address in a
//! single `getifaddrs` call and groups them per interface, so no per-interface
//! queries are issued. The default route is resolved by [`crate::route`].

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;

use ifsift_common::debug;
use ifsift_common::error::Result;
use ifsift_common::models::{IPv4Addr, IPv6Addr, IfAddr, Interface, InterfaceFlags, SockAddr};
use ifsift_common::system::InterfaceRepository;

use crate::route;

pub struct SystemRepo;

impl InterfaceRepository for SystemRepo {
    fn all_interfaces(&self) -> Result<Vec<IfAddr>> {
        let interfaces: Vec<NetworkInterface> = datalink::interfaces();
        let ifaddrs: Vec<IfAddr> = interfaces.iter().flat_map(to_ifaddrs).collect();

        debug!(
            verbosity = 1,
            "Enumerated {} addresses on {} interfaces",
            ifaddrs.len(),
            interfaces.len()
        );

        Ok(ifaddrs)
    }

    fn default_interface_name(&self) -> Result<String> {
        route::default_interface_name(self)
    }
}

/// One record per address bound to `iface`, in the order the OS reported them.
pub fn to_ifaddrs(iface: &NetworkInterface) -> Vec<IfAddr> {
    let interface = to_interface(iface);
    iface
        .ips
        .iter()
        .map(|net| IfAddr::new(to_sock_addr(net), interface.clone()))
        .collect()
}

pub fn to_interface(iface: &NetworkInterface) -> Interface {
    let mut flags = InterfaceFlags::empty();
    flags.set(InterfaceFlags::UP, iface.is_up());
    flags.set(InterfaceFlags::BROADCAST, iface.is_broadcast());
    flags.set(InterfaceFlags::LOOPBACK, iface.is_loopback());
    flags.set(InterfaceFlags::POINT_TO_POINT, iface.is_point_to_point());
    flags.set(InterfaceFlags::MULTICAST, iface.is_multicast());

    Interface {
        index: iface.index,
        name: iface.name.clone(),
        mtu: read_mtu(&iface.name),
        flags,
        hardware_addr: iface.mac,
    }
}

fn to_sock_addr(net: &IpNetwork) -> SockAddr {
    match net {
        IpNetwork::V4(v4) => SockAddr::IPv4(IPv4Addr::from_network(*v4)),
        IpNetwork::V6(v6) => SockAddr::IPv6(IPv6Addr::from_network(*v6)),
    }
}

#[cfg(target_os = "linux")]
fn read_mtu(name: &str) -> u32 {
    std::fs::read_to_string(format!("/sys/class/net/{name}/mtu"))
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0)
}

#[cfg(not(target_os = "linux"))]
fn read_mtu(_name: &str) -> u32 {
    0
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
