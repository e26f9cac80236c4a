// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Socket Address Model
//!
//! [`SockAddr`] is a closed sum over the three address families the library
//! understands. Behaviour shared by every family lives on [`SockAddrOps`];
//! behaviour shared by the two IP families lives on [`IpAddrOps`].
//!
//! Comparisons return [`Ordering`]. `Equal` doubles as "no opinion": comparing
//! values of different families always yields `Equal`, which lets a multi-key
//! sort fall through to its next key.

use std::cmp::Ordering;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::ipv4::IPv4Addr;
use crate::models::ipv6::IPv6Addr;
use crate::models::unix::UnixSock;
use crate::rfc;

/// Family tag. The declaration order is the sort order: UNIX, then IPv4, then IPv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SockAddrType {
    Unix,
    IPv4,
    IPv6,
}

impl fmt::Display for SockAddrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SockAddrType::Unix => "UNIX",
            SockAddrType::IPv4 => "IPv4",
            SockAddrType::IPv6 => "IPv6",
        })
    }
}

/// Operations every address family provides.
pub trait SockAddrOps {
    fn kind(&self) -> SockAddrType;

    /// Network containment. Values of different families never contain each other.
    fn contains(&self, other: &SockAddr) -> bool;

    /// `(transport, endpoint)` for a datagram dial.
    fn dial_packet_args(&self) -> (&'static str, String);

    /// `(transport, endpoint)` for a stream dial.
    fn dial_stream_args(&self) -> (&'static str, String);

    /// `(transport, endpoint)` for a datagram listener.
    fn listen_packet_args(&self) -> (&'static str, String);

    /// `(transport, endpoint)` for a stream listener.
    fn listen_stream_args(&self) -> (&'static str, String);
}

/// Views shared by IPv4 and IPv6 addresses.
pub trait IpAddrOps: SockAddrOps + Copy + fmt::Display {
    /// The address without mask or port.
    fn ip(&self) -> IpAddr;
    fn port(&self) -> u16;
    fn mask_bits(&self) -> u32;
    /// Same address and port with the host mask.
    fn host_addr(&self) -> Self;
    /// The network prefix with this mask and no port.
    fn network(&self) -> Self;
    fn first_usable(&self) -> Self;
    fn last_usable(&self) -> Self;
    fn address_binary(&self) -> String;
    fn address_hex(&self) -> String;
    fn netmask_hex(&self) -> String;
    fn octets(&self) -> Vec<u8>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SockAddr {
    IPv4(IPv4Addr),
    IPv6(IPv6Addr),
    Unix(UnixSock),
}

impl SockAddr {
    /// Guesses the family: IPv4, then IPv6, then a UNIX path.
    ///
    /// The path branch is only taken when the input starts with `.` or `/`, or
    /// contains a `/`. Anything else is a parse error.
    pub fn parse(input: &str) -> Result<Self> {
        if let Ok(ip) = Self::parse_ip(input) {
            return Ok(ip);
        }
        if input.starts_with('.') || input.starts_with('/') || input.contains('/') {
            return UnixSock::new(input).map(SockAddr::Unix);
        }
        Err(Error::parse(input, "socket address"))
    }

    /// Accepts either IP family, never a path.
    pub fn parse_ip(input: &str) -> Result<Self> {
        if let Ok(v4) = IPv4Addr::parse(input) {
            return Ok(SockAddr::IPv4(v4));
        }
        IPv6Addr::parse(input)
            .map(SockAddr::IPv6)
            .map_err(|_| Error::parse(input, "IP"))
    }

    pub fn is_ip(&self) -> bool {
        !matches!(self, SockAddr::Unix(_))
    }

    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            SockAddr::IPv4(a) => Some(a.ip()),
            SockAddr::IPv6(a) => Some(a.ip()),
            SockAddr::Unix(_) => None,
        }
    }

    pub fn port(&self) -> Option<u16> {
        match self {
            SockAddr::IPv4(a) => Some(a.port()),
            SockAddr::IPv6(a) => Some(a.port()),
            SockAddr::Unix(_) => None,
        }
    }

    pub fn mask_bits(&self) -> Option<u32> {
        match self {
            SockAddr::IPv4(a) => Some(a.mask_bits()),
            SockAddr::IPv6(a) => Some(a.mask_bits()),
            SockAddr::Unix(_) => None,
        }
    }

    /// Big-endian octets of the mask, empty for UNIX sockets.
    pub fn mask_octets(&self) -> Vec<u8> {
        match self {
            SockAddr::IPv4(a) => a.mask().to_be_bytes().to_vec(),
            SockAddr::IPv6(a) => a.mask().to_be_bytes().to_vec(),
            SockAddr::Unix(_) => Vec::new(),
        }
    }

    /// Address order. UNIX sockets compare by path.
    pub fn cmp_address(&self, other: &SockAddr) -> Ordering {
        match self {
            SockAddr::IPv4(a) => a.cmp_address(other),
            SockAddr::IPv6(a) => a.cmp_address(other),
            SockAddr::Unix(a) => a.cmp_address(other),
        }
    }

    pub fn cmp_port(&self, other: &SockAddr) -> Ordering {
        match self {
            SockAddr::IPv4(a) => a.cmp_port(other),
            SockAddr::IPv6(a) => a.cmp_port(other),
            SockAddr::Unix(_) => Ordering::Equal,
        }
    }

    /// Members of RFC `rfc` sort before non-members.
    ///
    /// Unknown RFC numbers contain nothing, so every pair compares `Equal`.
    pub fn cmp_rfc(&self, rfc: u32, other: &SockAddr) -> Ordering {
        if self.kind() != other.kind() || !self.is_ip() {
            return Ordering::Equal;
        }
        let left = rfc::in_rfc(rfc, self);
        let right = rfc::in_rfc(rfc, other);
        right.cmp(&left)
    }

    /// Mask order on raw bytes: shorter prefixes (bigger networks) first.
    pub fn cmp_network_size(&self, other: &SockAddr) -> Ordering {
        if self.kind() != other.kind() || !self.is_ip() {
            return Ordering::Equal;
        }
        self.mask_octets().cmp(&other.mask_octets())
    }
}

impl SockAddrOps for SockAddr {
    fn kind(&self) -> SockAddrType {
        match self {
            SockAddr::IPv4(a) => a.kind(),
            SockAddr::IPv6(a) => a.kind(),
            SockAddr::Unix(a) => a.kind(),
        }
    }

    fn contains(&self, other: &SockAddr) -> bool {
        match self {
            SockAddr::IPv4(a) => a.contains(other),
            SockAddr::IPv6(a) => a.contains(other),
            SockAddr::Unix(a) => a.contains(other),
        }
    }

    fn dial_packet_args(&self) -> (&'static str, String) {
        match self {
            SockAddr::IPv4(a) => a.dial_packet_args(),
            SockAddr::IPv6(a) => a.dial_packet_args(),
            SockAddr::Unix(a) => a.dial_packet_args(),
        }
    }

    fn dial_stream_args(&self) -> (&'static str, String) {
        match self {
            SockAddr::IPv4(a) => a.dial_stream_args(),
            SockAddr::IPv6(a) => a.dial_stream_args(),
            SockAddr::Unix(a) => a.dial_stream_args(),
        }
    }

    fn listen_packet_args(&self) -> (&'static str, String) {
        match self {
            SockAddr::IPv4(a) => a.listen_packet_args(),
            SockAddr::IPv6(a) => a.listen_packet_args(),
            SockAddr::Unix(a) => a.listen_packet_args(),
        }
    }

    fn listen_stream_args(&self) -> (&'static str, String) {
        match self {
            SockAddr::IPv4(a) => a.listen_stream_args(),
            SockAddr::IPv6(a) => a.listen_stream_args(),
            SockAddr::Unix(a) => a.listen_stream_args(),
        }
    }
}

impl fmt::Display for SockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SockAddr::IPv4(a) => a.fmt(f),
            SockAddr::IPv6(a) => a.fmt(f),
            SockAddr::Unix(a) => a.fmt(f),
        }
    }
}

impl FromStr for SockAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<IPv4Addr> for SockAddr {
    fn from(a: IPv4Addr) -> Self {
        SockAddr::IPv4(a)
    }
}

impl From<IPv6Addr> for SockAddr {
    fn from(a: IPv6Addr) -> Self {
        SockAddr::IPv6(a)
    }
}

impl From<UnixSock> for SockAddr {
    fn from(a: UnixSock) -> Self {
        SockAddr::Unix(a)
    }
}

impl From<IpAddr> for SockAddr {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => SockAddr::IPv4(v4.into()),
            IpAddr::V6(v6) => SockAddr::IPv6(v6.into()),
        }
    }
}
