// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use regex::Regex;

use ifsift_common::error::{Error, Result};
use ifsift_common::models::{IfAddr, InterfaceFlags, SockAddr, SockAddrOps, SockAddrType};
use ifsift_common::utils::ip;
use ifsift_common::{debug, rfc};

/// What part of an [`IfAddr`] a filter looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Address,
    Flag,
    Name,
    Network,
    Port,
    Rfc,
    Size,
    Type,
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "address" => Ok(Selector::Address),
            "flag" | "flags" => Ok(Selector::Flag),
            "name" => Ok(Selector::Name),
            "network" => Ok(Selector::Network),
            "port" => Ok(Selector::Port),
            "rfc" | "rfcs" => Ok(Selector::Rfc),
            "size" => Ok(Selector::Size),
            "type" => Ok(Selector::Type),
            _ => Err(Error::selector(format!("invalid selector {s:?}"))),
        }
    }
}

/// Interface state or address property accepted by the `flag` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagToken {
    Up,
    Down,
    Broadcast,
    Loopback,
    Multicast,
    PointToPoint,
    Forwardable,
    GlobalUnicast,
    InterfaceLocalMulticast,
    LinkLocalMulticast,
    LinkLocalUnicast,
    Unspecified,
}

impl FlagToken {
    pub fn matches(self, ifaddr: &IfAddr) -> bool {
        let flags = ifaddr.interface.flags;
        let sa = &ifaddr.sock_addr;
        let ip_is = |test: fn(&std::net::IpAddr) -> bool| sa.ip().is_some_and(|ip| test(&ip));

        match self {
            FlagToken::Up => flags.contains(InterfaceFlags::UP),
            FlagToken::Down => !flags.contains(InterfaceFlags::UP),
            FlagToken::Broadcast => flags.contains(InterfaceFlags::BROADCAST),
            FlagToken::Loopback => flags.contains(InterfaceFlags::LOOPBACK),
            FlagToken::Multicast => flags.contains(InterfaceFlags::MULTICAST),
            FlagToken::PointToPoint => flags.contains(InterfaceFlags::POINT_TO_POINT),
            FlagToken::Forwardable => rfc::is_forwardable(sa),
            FlagToken::GlobalUnicast => ip_is(ip::is_global_unicast),
            FlagToken::InterfaceLocalMulticast => ip_is(ip::is_interface_local_multicast),
            FlagToken::LinkLocalMulticast => ip_is(ip::is_link_local_multicast),
            FlagToken::LinkLocalUnicast => ip_is(ip::is_link_local_unicast),
            FlagToken::Unspecified => ip_is(ip::is_unspecified),
        }
    }
}

impl FromStr for FlagToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(FlagToken::Up),
            "down" => Ok(FlagToken::Down),
            "broadcast" => Ok(FlagToken::Broadcast),
            "loopback" => Ok(FlagToken::Loopback),
            "multicast" => Ok(FlagToken::Multicast),
            "point-to-point" => Ok(FlagToken::PointToPoint),
            "forwardable" => Ok(FlagToken::Forwardable),
            "global unicast" => Ok(FlagToken::GlobalUnicast),
            "interface-local multicast" => Ok(FlagToken::InterfaceLocalMulticast),
            "link-local multicast" => Ok(FlagToken::LinkLocalMulticast),
            "link-local unicast" => Ok(FlagToken::LinkLocalUnicast),
            "unspecified" => Ok(FlagToken::Unspecified),
            _ => Err(Error::selector(format!("unsupported flag {s:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeToken {
    Ip,
    IPv4,
    IPv6,
    Unix,
}

impl TypeToken {
    fn matches(self, sa: &SockAddr) -> bool {
        match self {
            TypeToken::Ip => sa.is_ip(),
            TypeToken::IPv4 => sa.kind() == SockAddrType::IPv4,
            TypeToken::IPv6 => sa.kind() == SockAddrType::IPv6,
            TypeToken::Unix => sa.kind() == SockAddrType::Unix,
        }
    }
}

impl FromStr for TypeToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ip" => Ok(TypeToken::Ip),
            "ipv4" => Ok(TypeToken::IPv4),
            "ipv6" => Ok(TypeToken::IPv6),
            "unix" => Ok(TypeToken::Unix),
            _ => Err(Error::selector(format!("unsupported type {s:?}"))),
        }
    }
}

/// A selector bound to its parsed parameter.
///
/// Regular expressions and token lists are compiled once per filter call and
/// then tested against every record.
#[derive(Debug, Clone)]
pub enum Predicate {
    Address(Regex),
    Name(Regex),
    Port(Regex),
    Rfcs(Vec<u32>),
    Size(u32),
    Types(Vec<TypeToken>),
    Flags(Vec<FlagToken>),
    Networks(Vec<SockAddr>),
}

impl Predicate {
    pub fn compile(selector: Selector, param: &str) -> Result<Self> {
        let predicate = match selector {
            Selector::Address => Predicate::Address(compile_regex(param)?),
            Selector::Name => Predicate::Name(compile_regex(param)?),
            Selector::Port => Predicate::Port(compile_regex(param)?),
            Selector::Rfc => Predicate::Rfcs(split_tokens(param, parse_rfc)?),
            Selector::Size => Predicate::Size(param.trim().parse().map_err(|_| {
                Error::selector(format!("unable to parse mask size {param:?}"))
            })?),
            Selector::Type => Predicate::Types(split_tokens(param, str::parse)?),
            Selector::Flag => Predicate::Flags(split_tokens(param, str::parse)?),
            Selector::Network => {
                Predicate::Networks(split_tokens(param, |t| SockAddr::parse_ip(t.trim()))?)
            }
        };
        Ok(predicate)
    }

    pub fn matches(&self, ifaddr: &IfAddr) -> Result<bool> {
        let sa = &ifaddr.sock_addr;
        let matched = match self {
            Predicate::Address(re) => re.is_match(&sa.to_string()),
            Predicate::Name(re) => re.is_match(ifaddr.name()),
            Predicate::Port(re) => sa.port().is_some_and(|p| re.is_match(&p.to_string())),
            Predicate::Rfcs(rfcs) => rfcs.iter().any(|&n| rfc::in_rfc(n, sa)),
            Predicate::Size(bits) => match_size(*bits, sa)?,
            Predicate::Types(types) => types.iter().any(|t| t.matches(sa)),
            Predicate::Flags(flags) => flags.iter().all(|f| f.matches(ifaddr)),
            Predicate::Networks(nets) => nets.iter().any(|net| net.contains(sa)),
        };
        Ok(matched)
    }
}

fn compile_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(Error::regex(pattern))
}

fn split_tokens<T>(param: &str, parse: impl Fn(&str) -> Result<T>) -> Result<Vec<T>> {
    param.split('|').map(parse).collect()
}

fn parse_rfc(token: &str) -> Result<u32> {
    let number: u32 = token
        .trim()
        .parse()
        .map_err(|_| Error::selector(format!("unable to parse RFC number {token:?}")))?;

    if !rfc::known_rfcs().contains_key(&number) {
        return Err(Error::Rfc(number));
    }
    Ok(number)
}

fn match_size(bits: u32, sa: &SockAddr) -> Result<bool> {
    let max = match sa.kind() {
        SockAddrType::IPv4 => 32,
        SockAddrType::IPv6 => 128,
        SockAddrType::Unix => return Ok(false),
    };
    if bits > max {
        return Err(Error::selector(format!(
            "mask size {bits} out of bounds for {} address {sa}",
            sa.kind()
        )));
    }
    Ok(sa.mask_bits() == Some(bits))
}

/// Splits `ifaddrs` into matches and non-matches, both in input order.
pub fn partition(
    selector: &str,
    param: &str,
    ifaddrs: &[IfAddr],
) -> Result<(Vec<IfAddr>, Vec<IfAddr>)> {
    let predicate = Predicate::compile(selector.parse()?, param)?;

    let mut matched = Vec::with_capacity(ifaddrs.len());
    let mut rest = Vec::with_capacity(ifaddrs.len());
    for ifaddr in ifaddrs {
        if predicate.matches(ifaddr)? {
            matched.push(ifaddr.clone());
        } else {
            rest.push(ifaddr.clone());
        }
    }

    debug!(
        verbosity = 2,
        "Selector {selector} {param:?} matched {} of {}",
        matched.len(),
        ifaddrs.len()
    );

    Ok((matched, rest))
}

pub fn include(selector: &str, param: &str, ifaddrs: &[IfAddr]) -> Result<Vec<IfAddr>> {
    partition(selector, param, ifaddrs).map(|(matched, _)| matched)
}

pub fn exclude(selector: &str, param: &str, ifaddrs: &[IfAddr]) -> Result<Vec<IfAddr>> {
    partition(selector, param, ifaddrs).map(|(_, rest)| rest)
}
