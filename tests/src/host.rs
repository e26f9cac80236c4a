// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use ifsift_common::models::{InterfaceFlags, SockAddrOps, SockAddrType};
use ifsift_common::system::InterfaceRepository;
use ifsift_core::ifaddrs;
use ifsift_core::system::SystemRepo;
use ifsift_template::render;

#[test]
fn host_enumeration_should_include_loopback() {
    let all = SystemRepo
        .all_interfaces()
        .expect("enumerating interfaces failed");

    let loopback = ifaddrs::include("flag", "loopback", &all).unwrap();
    assert!(
        loopback
            .iter()
            .all(|i| i.interface.flags.contains(InterfaceFlags::LOOPBACK))
    );
    assert!(
        all.iter()
            .all(|i| i.sock_addr.kind() != SockAddrType::Unix),
        "interfaces never carry UNIX addresses"
    );
}

#[test]
fn host_templates_should_render() {
    let out = render("{{GetAllInterfaces | len}}").expect("rendering failed");
    assert!(out.parse::<usize>().is_ok(), "unexpected output {out:?}");
}

#[test]
#[cfg(target_os = "linux")]
fn privileged_veth_should_be_discovered() {
    use crate::utils::netns::VethContext;

    let ctx = match VethContext::new("t1", "10.200.0.1/24") {
        Some(c) => c,
        None => {
            eprintln!("Skipping veth test: requires root privileges and the 'ip' command.");
            return;
        }
    };

    let all = SystemRepo.all_interfaces().unwrap();
    let ours = ifaddrs::include("name", &format!("^{}$", ctx.host_if), &all).unwrap();
    let found = ifaddrs::join("address", " ", &ours).unwrap();

    assert!(
        found.split(' ').any(|a| a == "10.200.0.1"),
        "veth address not found in {found:?}"
    );
    assert!(
        ifaddrs::include("network", "10.200.0.0/24", &all)
            .unwrap()
            .iter()
            .any(|i| i.interface.name == ctx.host_if)
    );
}
