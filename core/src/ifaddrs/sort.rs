// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Multi-key ordering.
//!
//! Comparators across families or against UNIX sockets answer `Equal`, so a
//! later key (usually `type`) is what separates mixed lists.

use std::cmp::Ordering;
use std::str::FromStr;

use ifsift_common::error::{Error, Result};
use ifsift_common::models::{IfAddr, SockAddrOps};
use ifsift_common::rfc::PRIVATE_RFC;

pub type CmpIfAddrFn = fn(&IfAddr, &IfAddr) -> Ordering;

pub fn asc_address(a: &IfAddr, b: &IfAddr) -> Ordering {
    a.sock_addr.cmp_address(&b.sock_addr)
}

pub fn asc_name(a: &IfAddr, b: &IfAddr) -> Ordering {
    a.interface.name.cmp(&b.interface.name)
}

pub fn asc_port(a: &IfAddr, b: &IfAddr) -> Ordering {
    a.sock_addr.cmp_port(&b.sock_addr)
}

/// Private (RFC 6890) addresses first.
pub fn asc_private(a: &IfAddr, b: &IfAddr) -> Ordering {
    a.sock_addr.cmp_rfc(PRIVATE_RFC, &b.sock_addr)
}

/// Larger networks first.
pub fn asc_network_size(a: &IfAddr, b: &IfAddr) -> Ordering {
    a.sock_addr.cmp_network_size(&b.sock_addr)
}

/// UNIX, then IPv4, then IPv6.
pub fn asc_type(a: &IfAddr, b: &IfAddr) -> Ordering {
    a.sock_addr.kind().cmp(&b.sock_addr.kind())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Address,
    Name,
    Port,
    Private,
    Size,
    Type,
}

impl SortKey {
    pub fn ascending(self) -> CmpIfAddrFn {
        match self {
            SortKey::Address => asc_address,
            SortKey::Name => asc_name,
            SortKey::Port => asc_port,
            SortKey::Private => asc_private,
            SortKey::Size => asc_network_size,
            SortKey::Type => asc_type,
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "address" => Ok(SortKey::Address),
            "name" => Ok(SortKey::Name),
            "port" => Ok(SortKey::Port),
            "private" => Ok(SortKey::Private),
            "size" => Ok(SortKey::Size),
            "type" => Ok(SortKey::Type),
            _ => Err(Error::selector(format!("unsupported sort key {s:?}"))),
        }
    }
}

/// One `[+-]key` element of a sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortClause {
    pub key: SortKey,
    pub descending: bool,
}

impl SortClause {
    pub fn compare(&self, a: &IfAddr, b: &IfAddr) -> Ordering {
        let ord = (self.key.ascending())(a, b);
        if self.descending { ord.reverse() } else { ord }
    }
}

impl FromStr for SortClause {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let clause = s.trim();
        let (descending, key) = match clause.strip_prefix('-') {
            Some(key) => (true, key),
            None => (false, clause.strip_prefix('+').unwrap_or(clause)),
        };
        Ok(SortClause {
            key: key.parse()?,
            descending,
        })
    }
}

/// Parses `"+type,-size,address"` into its clauses.
pub fn parse_sort_spec(spec: &str) -> Result<Vec<SortClause>> {
    spec.split(',').map(str::parse).collect()
}

/// Stable sort where the first comparator that tells two records apart decides.
///
/// Records every comparator calls equal keep their input order.
pub fn ordered_by<C>(comparators: &[C], ifaddrs: &mut [IfAddr])
where
    C: Fn(&IfAddr, &IfAddr) -> Ordering,
{
    ifaddrs.sort_by(|a, b| {
        comparators
            .iter()
            .fold(Ordering::Equal, |ord, cmp| ord.then_with(|| cmp(a, b)))
    });
}

pub fn sort_by(spec: &str, ifaddrs: &[IfAddr]) -> Result<Vec<IfAddr>> {
    let clauses = parse_sort_spec(spec)?;
    let comparators: Vec<_> = clauses
        .iter()
        .map(|clause| move |a: &IfAddr, b: &IfAddr| clause.compare(a, b))
        .collect();

    let mut sorted = ifaddrs.to_vec();
    ordered_by(&comparators, &mut sorted);
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifsift_common::models::{Interface, InterfaceFlags, SockAddr};
    use proptest::prelude::*;

    fn ifaddr(addr: &str, name: &str) -> IfAddr {
        IfAddr::new(
            SockAddr::parse(addr).unwrap(),
            Interface {
                index: 1,
                name: name.to_string(),
                mtu: 0,
                flags: InterfaceFlags::UP,
                hardware_addr: None,
            },
        )
    }

    fn rendered(list: &[IfAddr]) -> Vec<String> {
        list.iter().map(|i| i.sock_addr.to_string()).collect()
    }

    #[test]
    fn type_then_size_should_group_families() {
        let list = vec![
            ifaddr("2001:db8::1/64", "eth0"),
            ifaddr("10.0.0.1/32", "eth0"),
            ifaddr("/tmp/sock", "eth0"),
            ifaddr("10.0.0.0/8", "eth0"),
        ];
        let sorted = sort_by("type,size", &list).unwrap();
        assert_eq!(
            rendered(&sorted),
            vec!["\"/tmp/sock\"", "10.0.0.0/8", "10.0.0.1", "2001:db8::1/64"]
        );
    }

    #[test]
    fn descending_prefix_should_reverse_a_key() {
        let list = vec![
            ifaddr("10.0.0.2", "a"),
            ifaddr("10.0.0.10", "b"),
            ifaddr("10.0.0.1", "c"),
        ];
        let asc = sort_by("+address", &list).unwrap();
        assert_eq!(rendered(&asc), vec!["10.0.0.1", "10.0.0.2", "10.0.0.10"]);

        let desc = sort_by("-address", &list).unwrap();
        assert_eq!(rendered(&desc), vec!["10.0.0.10", "10.0.0.2", "10.0.0.1"]);
    }

    #[test]
    fn private_key_should_put_rfc6890_members_first() {
        let list = vec![
            ifaddr("8.8.8.8", "wan"),
            ifaddr("192.168.0.1", "lan"),
            ifaddr("1.1.1.1", "wan"),
        ];
        let sorted = sort_by("private", &list).unwrap();
        assert_eq!(rendered(&sorted), vec!["192.168.0.1", "8.8.8.8", "1.1.1.1"]);
    }

    #[test]
    fn later_keys_should_break_ties() {
        let list = vec![
            ifaddr("10.0.0.3", "eth1"),
            ifaddr("10.0.0.2", "eth0"),
            ifaddr("10.0.0.1", "eth1"),
        ];
        let sorted = sort_by("name,-address", &list).unwrap();
        assert_eq!(rendered(&sorted), vec!["10.0.0.2", "10.0.0.3", "10.0.0.1"]);
    }

    #[test]
    fn port_order_should_ignore_addresses() {
        let list = vec![ifaddr("10.0.0.1:443", "a"), ifaddr("10.0.0.9:22", "a")];
        let sorted = sort_by("port", &list).unwrap();
        assert_eq!(rendered(&sorted), vec!["10.0.0.9:22", "10.0.0.1:443"]);
    }

    #[test]
    fn unknown_key_should_be_an_error() {
        assert!(sort_by("speed", &[]).is_err());
        assert!(sort_by("name,", &[]).is_err());
        assert!(sort_by("", &[]).is_err());
    }

    #[test]
    fn clause_parse_should_read_direction() {
        let clause: SortClause = " -size".parse().unwrap();
        assert_eq!(clause.key, SortKey::Size);
        assert!(clause.descending);

        let clause: SortClause = "+Name".parse().unwrap();
        assert_eq!(clause.key, SortKey::Name);
        assert!(!clause.descending);
    }

    proptest! {
        #[test]
        fn equal_keys_should_keep_input_order(names in proptest::collection::vec("[ab]", 0..12)) {
            let list: Vec<IfAddr> = names
                .iter()
                .enumerate()
                .map(|(i, n)| ifaddr(&format!("10.0.0.{i}"), n))
                .collect();

            let sorted = sort_by("name", &list).unwrap();
            for pair in sorted.windows(2) {
                if pair[0].interface.name == pair[1].interface.name {
                    prop_assert_eq!(asc_address(&pair[0], &pair[1]), Ordering::Less);
                }
            }
        }

        #[test]
        fn sorting_twice_should_change_nothing(octets in proptest::collection::vec(any::<u8>(), 0..12)) {
            let list: Vec<IfAddr> = octets
                .iter()
                .map(|o| ifaddr(&format!("172.16.{o}.1/{}", 16 + o % 16), "x"))
                .collect();

            let once = sort_by("size,-address", &list).unwrap();
            let twice = sort_by("size,-address", &once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
