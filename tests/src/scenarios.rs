// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use ifsift_common::models::{InterfaceFlags, IpAddrOps, SockAddr, SockAddrOps, SockAddrType};
use ifsift_common::rfc;
use ifsift_core::{attr, ifaddrs, sources};
use ifsift_template::{Template, render_with};

use crate::utils::{FixtureRepo, addresses, bare, ifaddr};

fn host() -> FixtureRepo {
    let up = InterfaceFlags::UP | InterfaceFlags::BROADCAST | InterfaceFlags::MULTICAST;
    let lo = InterfaceFlags::UP | InterfaceFlags::LOOPBACK;
    FixtureRepo {
        ifaddrs: vec![
            ifaddr("127.0.0.1/8", "lo", 1, lo),
            ifaddr("::1", "lo", 1, lo),
            ifaddr("10.1.2.3/24", "eth0", 2, up),
            ifaddr("fe80::a00:27ff:fe4e:66a1/64", "eth0", 2, up),
            ifaddr("192.168.50.9/24", "wlan0", 3, up),
        ],
        default: "eth0".to_string(),
    }
}

#[test]
fn bare_ipv4_should_parse_as_a_host() {
    let sa = SockAddr::parse("1.2.3.4").unwrap();
    let SockAddr::IPv4(v4) = &sa else {
        panic!("expected IPv4, got {sa:?}");
    };

    assert_eq!(sa.kind(), SockAddrType::IPv4);
    assert_eq!(v4.octets(), vec![1, 2, 3, 4]);
    assert_eq!(v4.mask_bits(), 32);
    assert_eq!(v4.port(), 0);
    assert_eq!(sa.to_string(), "1.2.3.4");
    assert_eq!(attr::sock_addr_attr(&sa, "hex"), "01020304");
    assert_eq!(
        attr::sock_addr_attr(&sa, "binary"),
        "00000001000000100000001100000100"
    );
}

#[test]
fn cidr_ipv6_should_normalise_and_bound_the_network() {
    let sa = SockAddr::parse("2001:DB8::/32").unwrap();

    assert_eq!(sa.kind(), SockAddrType::IPv6);
    assert_eq!(sa.mask_bits(), Some(32));
    assert_eq!(sa.to_string(), "2001:db8::/32");
    assert_eq!(attr::sock_addr_attr(&sa, "first_usable"), "2001:db8::");
    assert_eq!(
        attr::sock_addr_attr(&sa, "last_usable"),
        "2001:db8:ffff:ffff:ffff:ffff:ffff:ffff"
    );
}

#[test]
fn rfc_membership_should_follow_the_table() {
    let sa = |s: &str| SockAddr::parse(s).unwrap();

    assert!(rfc::is_rfc(1918, &sa("10.1.2.3")).unwrap());
    assert!(!rfc::is_rfc(1918, &sa("8.8.8.8")).unwrap());
    assert!(rfc::is_rfc(6890, &sa("::1")).unwrap());
}

#[test]
fn size_sort_should_put_larger_networks_first() {
    let input = vec![
        bare("10.0.0.0/8"),
        bare("127.0.0.0/24"),
        bare("192.168.0.0/16"),
    ];

    let sorted = ifaddrs::sort_by("size", &input).unwrap();
    assert_eq!(
        addresses(&sorted),
        vec!["10.0.0.0/8", "192.168.0.0/16", "127.0.0.0/24"]
    );

    let reversed = ifaddrs::sort_by("-size", &input).unwrap();
    assert_eq!(
        addresses(&reversed),
        vec!["127.0.0.0/24", "192.168.0.0/16", "10.0.0.0/8"]
    );
}

#[test]
fn private_interface_template_should_render_the_default_address() {
    let src = r#"{{GetPrivateInterfaces | limit 1 | join "address" " "}}"#;
    assert_eq!(render_with(&host(), src).unwrap(), "10.1.2.3");
}

#[test]
fn include_and_exclude_should_split_the_list() {
    let input = vec![bare("1.2.3.4"), bare("::1")];

    let v4 = ifaddrs::include("type", "ipv4", &input).unwrap();
    let rest = ifaddrs::exclude("type", "ipv4", &input).unwrap();

    assert_eq!(addresses(&v4), vec!["1.2.3.4"]);
    assert_eq!(addresses(&rest), vec!["::1"]);
}

#[test]
fn sources_and_templates_should_agree() {
    let repo = host();
    let template = Template::parse("{{GetPrivateIPs}}|{{GetInterfaceIP \"wlan\"}}").unwrap();

    let expected = format!(
        "{}|{}",
        sources::private_ips(&repo).unwrap(),
        sources::interface_ip(&repo, "wlan").unwrap()
    );
    assert_eq!(template.execute(&repo).unwrap(), expected);
    assert_eq!(expected, "10.1.2.3 fe80::a00:27ff:fe4e:66a1|192.168.50.9");
}

#[test]
fn public_selection_should_be_empty_on_a_private_host() {
    let repo = host();
    assert_eq!(sources::public_ip(&repo).unwrap(), "");
    assert_eq!(
        render_with(&repo, "{{if not GetPublicInterfaces}}none{{end}}").unwrap(),
        "none"
    );
}
