// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::cmp::Ordering;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::{Error, Result};
use crate::models::sockaddr::{IpAddrOps, SockAddr, SockAddrOps, SockAddrType};

/// Number of bits in an IPv4 address.
pub const IPV4_BITS: u32 = 32;

/// An IPv4 address with a prefix mask and an optional port.
///
/// A *bare* address carries the host mask (`/32`) and port `0`. The network
/// keeps its host bits even when the prefix is shorter, so `10.1.2.3/8` renders
/// back as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IPv4Addr {
    net: Ipv4Network,
    port: u16,
}

impl IPv4Addr {
    /// Builds an address from raw parts. Prefixes above 32 become a host prefix.
    pub fn from_parts(address: u32, mask_bits: u8, port: u16) -> Self {
        Self {
            net: network(Ipv4Addr::from(address), mask_bits),
            port,
        }
    }

    pub fn from_network(net: Ipv4Network) -> Self {
        Self { net, port: 0 }
    }

    pub fn from_octets(octets: [u8; 4], mask_bits: u8) -> Self {
        Self::from_parts(u32::from_be_bytes(octets), mask_bits, 0)
    }

    pub fn host(ip: Ipv4Addr) -> Self {
        Self::from_network(Ipv4Network::from(ip))
    }

    pub fn with_port(self, port: u16) -> Self {
        Self { port, ..self }
    }

    /// Parses `a.b.c.d`, `a.b.c.d/N` or `a.b.c.d:P`.
    ///
    /// Anything that is not a dotted quad is rejected, including IPv4-mapped
    /// IPv6 text such as `::ffff:1.2.3.4`.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        let invalid = || Error::parse(input, "IPv4");

        if let Some((addr, bits)) = text.split_once('/') {
            let ip = Ipv4Addr::from_str(addr).map_err(|_| invalid())?;
            let bits = parse_decimal::<u8>(bits).ok_or_else(invalid)?;
            let net = Ipv4Network::new(ip, bits).map_err(|_| invalid())?;
            return Ok(Self::from_network(net));
        }

        if let Ok(ip) = Ipv4Addr::from_str(text) {
            return Ok(Self::host(ip));
        }

        let (addr, port) = text.rsplit_once(':').ok_or_else(invalid)?;
        let ip = Ipv4Addr::from_str(addr).map_err(|_| invalid())?;
        let port = parse_decimal(port).ok_or_else(invalid)?;
        Ok(Self::host(ip).with_port(port))
    }

    pub fn address(&self) -> Ipv4Addr {
        self.net.ip()
    }

    pub fn to_u32(&self) -> u32 {
        u32::from(self.net.ip())
    }

    pub fn mask(&self) -> u32 {
        u32::from(self.net.mask())
    }

    pub fn network_address(&self) -> u32 {
        u32::from(self.net.network())
    }

    pub fn broadcast_address(&self) -> u32 {
        u32::from(self.net.broadcast())
    }

    /// The broadcast address of this network as a bare host.
    pub fn broadcast(&self) -> Self {
        Self::host(self.net.broadcast())
    }

    /// Number of addresses in the network, `2^(32 - prefix)`.
    pub fn network_size(&self) -> u64 {
        1u64 << (IPV4_BITS - self.mask_bits())
    }

    pub fn cmp_address(&self, other: &SockAddr) -> Ordering {
        match other {
            SockAddr::IPv4(b) => self.address().cmp(&b.address()),
            _ => Ordering::Equal,
        }
    }

    pub fn cmp_port(&self, other: &SockAddr) -> Ordering {
        match other {
            SockAddr::IPv4(b) => self.port.cmp(&b.port),
            _ => Ordering::Equal,
        }
    }

    fn is_host(&self) -> bool {
        u32::from(self.net.prefix()) == IPV4_BITS
    }

    fn endpoint(&self, with_zero_port: bool) -> String {
        if !self.is_host() || (self.port == 0 && !with_zero_port) {
            return String::new();
        }
        format!("{}:{}", self.address(), self.port)
    }
}

impl SockAddrOps for IPv4Addr {
    fn kind(&self) -> SockAddrType {
        SockAddrType::IPv4
    }

    fn contains(&self, other: &SockAddr) -> bool {
        match other {
            SockAddr::IPv4(b) => self.net.contains(b.address()),
            _ => false,
        }
    }

    fn dial_packet_args(&self) -> (&'static str, String) {
        ("udp4", self.endpoint(false))
    }

    fn dial_stream_args(&self) -> (&'static str, String) {
        ("tcp4", self.endpoint(false))
    }

    fn listen_packet_args(&self) -> (&'static str, String) {
        ("udp4", self.endpoint(true))
    }

    fn listen_stream_args(&self) -> (&'static str, String) {
        ("tcp4", self.endpoint(true))
    }
}

impl IpAddrOps for IPv4Addr {
    fn ip(&self) -> IpAddr {
        IpAddr::V4(self.address())
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
        let mut addr = self.network_address();
        // /31 is a point-to-point pair and /32 a single host, both use the lowest address.
        if self.mask_bits() < 31 {
            addr += 1;
        }
        Self::from_parts(addr, 32, 0)
    }

    fn last_usable(&self) -> Self {
        let mut addr = self.broadcast_address();
        if self.mask_bits() < 31 {
            addr -= 1;
        }
        Self::from_parts(addr, 32, 0)
    }

    fn address_binary(&self) -> String {
        format!("{:032b}", self.to_u32())
    }

    fn address_hex(&self) -> String {
        format!("{:08x}", self.to_u32())
    }

    fn netmask_hex(&self) -> String {
        format!("{:08x}", self.mask())
    }

    fn octets(&self) -> Vec<u8> {
        self.address().octets().to_vec()
    }
}

impl fmt::Display for IPv4Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port != 0 {
            return write!(f, "{}:{}", self.address(), self.port);
        }
        if self.is_host() {
            return write!(f, "{}", self.address());
        }
        write!(f, "{}", self.net)
    }
}

impl FromStr for IPv4Addr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Ipv4Addr> for IPv4Addr {
    fn from(ip: Ipv4Addr) -> Self {
        Self::host(ip)
    }
}

/// `ip/prefix`, or the host network of `ip` when the prefix is out of range.
fn network(ip: Ipv4Addr, prefix: u8) -> Ipv4Network {
    Ipv4Network::new(ip, prefix).unwrap_or_else(|_| Ipv4Network::from(ip))
}

/// Plain ASCII digits only. Signs and whitespace that `FromStr` would let
/// through are rejected.
pub(crate) fn parse_decimal<T: FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
