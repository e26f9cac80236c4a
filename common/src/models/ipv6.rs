// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::cmp::Ordering;
use std::fmt;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use pnet::ipnetwork::Ipv6Network;

use crate::error::{Error, Result};
use crate::models::ipv4::parse_decimal;
use crate::models::sockaddr::{IpAddrOps, SockAddr, SockAddrOps, SockAddrType};

pub const IPV6_BITS: u32 = 128;

/// `2^128` does not fit in a `u128`, it is the size of `::/0`.
const FULL_SPACE_SIZE: &str = "340282366920938463463374607431768211456";

/// An IPv6 address with a prefix mask and an optional port.
///
/// Scope identifiers (`%eth0`) are not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IPv6Addr {
    net: Ipv6Network,
    port: u16,
}

impl IPv6Addr {
    /// Builds an address from raw parts. Prefixes above 128 become a host prefix.
    pub fn from_parts(address: u128, mask_bits: u8, port: u16) -> Self {
        Self {
            net: network(Ipv6Addr::from(address), mask_bits),
            port,
        }
    }

    pub fn from_network(net: Ipv6Network) -> Self {
        Self { net, port: 0 }
    }

    pub fn from_segments(segments: [u16; 8], mask_bits: u8) -> Self {
        Self::from_network(network(Ipv6Addr::from(segments), mask_bits))
    }

    pub fn host(ip: Ipv6Addr) -> Self {
        Self::from_network(Ipv6Network::from(ip))
    }

    pub fn with_port(self, port: u16) -> Self {
        Self { port, ..self }
    }

    /// Parses `X::X`, `X::X/N`, `[X::X]`, `[X::X/N]` or `[X::X]:P`.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        let invalid = || Error::parse(input, "IPv6");

        let Some(rest) = text.strip_prefix('[') else {
            return parse_unbracketed(text).ok_or_else(invalid);
        };

        let (inner, tail) = rest.split_once(']').ok_or_else(invalid)?;
        if tail.is_empty() {
            return parse_unbracketed(inner).ok_or_else(invalid);
        }

        let port = tail
            .strip_prefix(':')
            .and_then(parse_decimal)
            .ok_or_else(invalid)?;
        let ip = Ipv6Addr::from_str(inner).map_err(|_| invalid())?;
        Ok(Self::host(ip).with_port(port))
    }

    pub fn address(&self) -> Ipv6Addr {
        self.net.ip()
    }

    pub fn to_u128(&self) -> u128 {
        u128::from(self.net.ip())
    }

    pub fn mask(&self) -> u128 {
        u128::from(self.net.mask())
    }

    pub fn network_address(&self) -> u128 {
        u128::from(self.net.network())
    }

    /// Number of addresses in the network as a decimal string, `2^(128 - prefix)`.
    pub fn network_size(&self) -> String {
        match 1u128.checked_shl(IPV6_BITS - self.mask_bits()) {
            Some(size) => size.to_string(),
            None => FULL_SPACE_SIZE.to_string(),
        }
    }

    pub fn cmp_address(&self, other: &SockAddr) -> Ordering {
        match other {
            SockAddr::IPv6(b) => self.address().cmp(&b.address()),
            _ => Ordering::Equal,
        }
    }

    pub fn cmp_port(&self, other: &SockAddr) -> Ordering {
        match other {
            SockAddr::IPv6(b) => self.port.cmp(&b.port),
            _ => Ordering::Equal,
        }
    }

    fn is_host(&self) -> bool {
        u32::from(self.net.prefix()) == IPV6_BITS
    }

    fn endpoint(&self, with_zero_port: bool) -> String {
        if !self.is_host() || (self.port == 0 && !with_zero_port) {
            return String::new();
        }
        format!("[{}]:{}", self.address(), self.port)
    }
}

fn parse_unbracketed(text: &str) -> Option<IPv6Addr> {
    match text.split_once('/') {
        Some((addr, bits)) => {
            let ip = Ipv6Addr::from_str(addr).ok()?;
            let net = Ipv6Network::new(ip, parse_decimal(bits)?).ok()?;
            Some(IPv6Addr::from_network(net))
        }
        None => Ipv6Addr::from_str(text).ok().map(IPv6Addr::host),
    }
}

/// `ip/prefix`, or the host network of `ip` when the prefix is out of range.
fn network(ip: Ipv6Addr, prefix: u8) -> Ipv6Network {
    Ipv6Network::new(ip, prefix).unwrap_or_else(|_| Ipv6Network::from(ip))
}

impl SockAddrOps for IPv6Addr {
    fn kind(&self) -> SockAddrType {
        SockAddrType::IPv6
    }

    fn contains(&self, other: &SockAddr) -> bool {
        match other {
            SockAddr::IPv6(b) => self.net.contains(b.address()),
            _ => false,
        }
    }

    fn dial_packet_args(&self) -> (&'static str, String) {
        ("udp6", self.endpoint(false))
    }

    fn dial_stream_args(&self) -> (&'static str, String) {
        ("tcp6", self.endpoint(false))
    }

    fn listen_packet_args(&self) -> (&'static str, String) {
        ("udp6", self.endpoint(true))
    }

    fn listen_stream_args(&self) -> (&'static str, String) {
        ("tcp6", self.endpoint(true))
    }
}

impl IpAddrOps for IPv6Addr {
    fn ip(&self) -> IpAddr {
        IpAddr::V6(self.address())
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn mask_bits(&self) -> u32 {
        u32::from(self.net.prefix())
    }

    fn host_addr(&self) -> Self {
        Self::host(self.address()).with_port(self.port)
    }

    fn network(&self) -> Self {
        Self::from_network(network(self.net.network(), self.net.prefix()))
    }

    fn first_usable(&self) -> Self {
        Self::host(self.net.network())
    }

    fn last_usable(&self) -> Self {
        Self::host(self.net.broadcast())
    }

    fn address_binary(&self) -> String {
        format!("{:0128b}", self.to_u128())
    }

    fn address_hex(&self) -> String {
        format!("{:032x}", self.to_u128())
    }

    fn netmask_hex(&self) -> String {
        format!("{:032x}", self.mask())
    }

    fn octets(&self) -> Vec<u8> {
        self.address().octets().to_vec()
    }
}

impl fmt::Display for IPv6Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port != 0 {
            return write!(f, "[{}]:{}", self.address(), self.port);
        }
        if self.is_host() {
            return write!(f, "{}", self.address());
        }
        write!(f, "{}", self.net)
    }
}

impl FromStr for IPv6Addr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Ipv6Addr> for IPv6Addr {
    fn from(ip: Ipv6Addr) -> Self {
        Self::host(ip)
    }
}
