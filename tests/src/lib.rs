// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

mod host;
mod scenarios;

pub mod utils {
    use ifsift_common::error::Result;
    use ifsift_common::models::{IfAddr, Interface, InterfaceFlags, SockAddr};
    use ifsift_common::system::InterfaceRepository;

    /// A fixed interface table with a fixed default interface.
    pub struct FixtureRepo {
        pub ifaddrs: Vec<IfAddr>,
        pub default: String,
    }

    impl InterfaceRepository for FixtureRepo {
        fn all_interfaces(&self) -> Result<Vec<IfAddr>> {
            Ok(self.ifaddrs.clone())
        }

        fn default_interface_name(&self) -> Result<String> {
            Ok(self.default.clone())
        }
    }

    pub fn ifaddr(addr: &str, name: &str, index: u32, flags: InterfaceFlags) -> IfAddr {
        IfAddr::new(
            SockAddr::parse(addr).unwrap(),
            Interface {
                index,
                name: name.to_string(),
                mtu: 1500,
                flags,
                hardware_addr: None,
            },
        )
    }

    /// An address bound to no particular interface.
    pub fn bare(addr: &str) -> IfAddr {
        ifaddr(addr, "", 0, InterfaceFlags::default())
    }

    pub fn addresses(ifaddrs: &[IfAddr]) -> Vec<String> {
        ifaddrs.iter().map(|i| i.sock_addr.to_string()).collect()
    }

    #[cfg(target_os = "linux")]
    pub mod netns {
        use std::process::Command;

        /// RAII wrapper around a veth pair whose far end lives in its own namespace.
        pub struct VethContext {
            pub ns_name: String,
            pub host_if: String,
        }

        impl VethContext {
            /// Returns `None` when the host refuses, usually for lack of privileges.
            pub fn new(suffix: &str, host_cidr: &str) -> Option<Self> {
                let ns_name = format!("ifsift-ns-{}", suffix);
                let host_if = format!("v-host-{}", suffix);
                let target_if = format!("v-targ-{}", suffix);

                Self::cleanup(&ns_name, &host_if);

                if !run_cmd("ip", &["netns", "add", &ns_name]) {
                    return None;
                }

                let ctx = Self { ns_name, host_if };

                let steps: [&[&str]; 4] = [
                    &[
                        "link", "add", &ctx.host_if, "type", "veth", "peer", "name", &target_if,
                    ],
                    &["link", "set", &target_if, "netns", &ctx.ns_name],
                    &["addr", "add", host_cidr, "dev", &ctx.host_if],
                    &["link", "set", &ctx.host_if, "up"],
                ];
                if steps.iter().all(|args| run_cmd("ip", args)) {
                    Some(ctx)
                } else {
                    None
                }
            }

            fn cleanup(ns_name: &str, host_if: &str) {
                let _ = Command::new("ip").args(["netns", "del", ns_name]).output();
                let _ = Command::new("ip").args(["link", "del", host_if]).output();
            }
        }

        impl Drop for VethContext {
            fn drop(&mut self) {
                Self::cleanup(&self.ns_name, &self.host_if);
            }
        }

        fn run_cmd(cmd: &str, args: &[&str]) -> bool {
            match Command::new(cmd).args(args).output() {
                Ok(out) => out.status.success(),
                Err(_) => false,
            }
        }
    }
}
