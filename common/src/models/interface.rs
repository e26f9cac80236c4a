// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Interface Model
//!
//! A snapshot of one host interface and the [`IfAddr`] records built from it.
//! Every address bound to an interface becomes its own [`IfAddr`] carrying a copy
//! of the interface, so records can be filtered and sorted independently.

use std::fmt;

use bitflags::bitflags;
use pnet::util::MacAddr;

use crate::models::sockaddr::SockAddr;

bitflags! {
    /// Interface state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct InterfaceFlags: u8 {
        const UP = 1;
        const BROADCAST = 1 << 1;
        const LOOPBACK = 1 << 2;
        const POINT_TO_POINT = 1 << 3;
        const MULTICAST = 1 << 4;
    }
}

impl InterfaceFlags {
    const NAMED: [(Self, &'static str); 5] = [
        (Self::UP, "up"),
        (Self::BROADCAST, "broadcast"),
        (Self::LOOPBACK, "loopback"),
        (Self::POINT_TO_POINT, "point-to-point"),
        (Self::MULTICAST, "multicast"),
    ];

    /// Names of the raised flags in a fixed order.
    pub fn names(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl fmt::Display for InterfaceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join("|"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub index: u32,
    pub name: String,
    /// `0` when the platform does not report it.
    pub mtu: u32,
    pub flags: InterfaceFlags,
    pub hardware_addr: Option<MacAddr>,
}

impl Interface {
    pub fn hardware_addr_string(&self) -> String {
        self.hardware_addr
            .map(|mac| mac.to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{} {} {} {} {}}}",
            self.index,
            self.mtu,
            self.name,
            self.hardware_addr_string(),
            self.flags
        )
    }
}

/// One address bound to one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfAddr {
    pub sock_addr: SockAddr,
    pub interface: Interface,
}

impl IfAddr {
    pub fn new(sock_addr: SockAddr, interface: Interface) -> Self {
        Self {
            sock_addr,
            interface,
        }
    }

    pub fn name(&self) -> &str {
        &self.interface.name
    }
}

impl fmt::Display for IfAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {}}}", self.sock_addr, self.interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lo0() -> Interface {
        Interface {
            index: 1,
            name: "lo0".to_string(),
            mtu: 16384,
            flags: InterfaceFlags::UP | InterfaceFlags::LOOPBACK | InterfaceFlags::MULTICAST,
            hardware_addr: None,
        }
    }

    #[test]
    fn flags_should_render_pipe_joined() {
        assert_eq!(lo0().flags.to_string(), "up|loopback|multicast");
        assert_eq!(InterfaceFlags::empty().to_string(), "");
    }

    #[test]
    fn set_should_toggle_a_single_flag() {
        let mut flags = InterfaceFlags::UP | InterfaceFlags::BROADCAST;
        flags.set(InterfaceFlags::UP, false);
        assert!(!flags.contains(InterfaceFlags::UP));
        assert!(flags.contains(InterfaceFlags::BROADCAST));
    }

    #[test]
    fn unknown_bits_should_be_dropped() {
        let flags = InterfaceFlags::from_bits_truncate(0b1110_0001);
        assert_eq!(flags, InterfaceFlags::UP);
        assert_eq!(flags.names(), vec!["up"]);
    }

    #[test]
    fn ifaddr_should_render_address_then_interface() {
        let ifaddr = IfAddr::new(SockAddr::parse("127.0.0.1/8").unwrap(), lo0());
        assert_eq!(
            ifaddr.to_string(),
            "{127.0.0.1/8 {1 16384 lo0  up|loopback|multicast}}"
        );
        assert_eq!(ifaddr.name(), "lo0");
    }

    #[test]
    fn hardware_addr_should_render_colon_separated() {
        let mut iface = lo0();
        iface.hardware_addr = Some(MacAddr(0x1, 0x2, 0x3, 0x4, 0x5, 0x6));
        assert_eq!(iface.hardware_addr_string(), "01:02:03:04:05:06");
    }
}
