// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Default Route Discovery
//!
//! Finds the interface that carries the IPv4 default route. Each platform asks
//! its own routing tool and the text it prints is handed to one of the pure
//! parsers at the bottom of this module, so every format can be tested on any
//! host.
//!
//! | Platform               | Source                                   |
//! |------------------------|------------------------------------------|
//! | Linux                  | `ip route`, then `/proc/net/route`       |
//! | macOS, BSD, illumos    | `route -n get default`                   |
//! | Windows                | `netstat -rn`, mapped back by address    |

use std::net::IpAddr;
use std::process::Command;

use ifsift_common::debug;
use ifsift_common::error::{Error, Result};
use ifsift_common::system::InterfaceRepository;

pub fn default_interface_name(repo: &dyn InterfaceRepository) -> Result<String> {
    let name = platform::default_interface_name(repo)?;
    debug!(verbosity = 1, "Default route leaves through {name}");
    Ok(name)
}

/// Runs a routing tool and returns what it printed on stdout.
pub fn run_tool(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| Error::platform_io(format!("unable to run {program}"), e))?;

    if !output.status.success() {
        return Err(Error::platform(format!(
            "{program} {} exited with {}",
            args.join(" "),
            output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(target_os = "linux")]
mod platform {
    use super::*;

    const PROC_NET_ROUTE: &str = "/proc/net/route";

    pub fn default_interface_name(_repo: &dyn InterfaceRepository) -> Result<String> {
        match run_tool("ip", &["route"]) {
            Ok(out) => {
                if let Some(name) = parse_ip_route(&out) {
                    return Ok(name);
                }
                debug!(verbosity = 2, "ip route printed no default entry");
            }
            Err(e) => debug!(verbosity = 2, "ip route unavailable: {e}"),
        }

        let table = std::fs::read_to_string(PROC_NET_ROUTE)
            .map_err(|e| Error::platform_io(format!("unable to read {PROC_NET_ROUTE}"), e))?;
        parse_proc_net_route(&table).ok_or_else(|| Error::platform("no default route found"))
    }
}

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly",
    target_os = "solaris",
    target_os = "illumos"
))]
mod platform {
    use super::*;

    pub fn default_interface_name(_repo: &dyn InterfaceRepository) -> Result<String> {
        let out = run_tool("route", &["-n", "get", "default"])?;
        parse_bsd_route(&out).ok_or_else(|| Error::platform("no default route found"))
    }
}

#[cfg(windows)]
mod platform {
    use super::*;

    pub fn default_interface_name(repo: &dyn InterfaceRepository) -> Result<String> {
        let out = run_tool("netstat", &["-rn"])?;
        let ip = parse_windows_netstat(&out)
            .ok_or_else(|| Error::platform("no default route found"))?;

        repo.all_interfaces()?
            .into_iter()
            .find(|ifaddr| ifaddr.sock_addr.ip() == Some(ip))
            .map(|ifaddr| ifaddr.interface.name)
            .ok_or_else(|| Error::platform(format!("no interface holds default route address {ip}")))
    }
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly",
    target_os = "solaris",
    target_os = "illumos",
    windows
)))]
mod platform {
    use super::*;

    pub fn default_interface_name(_repo: &dyn InterfaceRepository) -> Result<String> {
        Err(Error::platform(format!(
            "default route lookup is unsupported on {}",
            std::env::consts::OS
        )))
    }
}

/// `ip route`: the device named on the first `default` line.
pub fn parse_ip_route(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.first() != Some(&"default") {
            return None;
        }
        fields
            .windows(2)
            .find(|pair| pair[0] == "dev")
            .map(|pair| pair[1].to_string())
    })
}

/// `/proc/net/route`: the first row whose destination and mask are both zero.
pub fn parse_proc_net_route(table: &str) -> Option<String> {
    table.lines().skip(1).find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let is_default = fields.len() >= 8 && fields[1] == "00000000" && fields[7] == "00000000";
        is_default.then(|| fields[0].to_string())
    })
}

/// `route -n get default`: the value of the `interface:` line.
pub fn parse_bsd_route(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("interface:"))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// `netstat -rn`: the interface address of the `0.0.0.0 0.0.0.0` row.
pub fn parse_windows_netstat(output: &str) -> Option<IpAddr> {
    output.lines().find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            ["0.0.0.0", "0.0.0.0", _gateway, iface, ..] => iface.parse().ok(),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const IP_ROUTE: &str = "\
default via 192.168.1.1 dev wlp3s0 proto dhcp src 192.168.1.42 metric 600
172.17.0.0/16 dev docker0 proto kernel scope link src 172.17.0.1 linkdown
192.168.1.0/24 dev wlp3s0 proto kernel scope link src 192.168.1.42 metric 600
";

    const PROC_ROUTE: &str = "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
eth0\t0000A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0
eth0\t00000000\t0101A8C0\t0003\t0\t0\t100\t00000000\t0\t0\t0
";

    const BSD_ROUTE: &str = "\
   route to: default
destination: default
       mask: default
    gateway: 10.0.0.1
  interface: en0
      flags: <UP,GATEWAY,DONE,STATIC,PRCLONING>
";

    const NETSTAT: &str = "\
IPv4 Route Table
===========================================================================
Active Routes:
Network Destination        Netmask          Gateway       Interface  Metric
          0.0.0.0          0.0.0.0      10.88.88.2     10.88.88.149     10
       10.88.88.0    255.255.255.0         On-link      10.88.88.149    266
";

    #[test]
    fn ip_route_should_yield_the_default_device() {
        assert_eq!(parse_ip_route(IP_ROUTE).as_deref(), Some("wlp3s0"));
    }

    #[test]
    fn ip_route_without_default_should_yield_none() {
        let table = "10.0.0.0/8 dev eth0 proto kernel scope link src 10.1.2.3\n";
        assert_eq!(parse_ip_route(table), None);
        assert_eq!(parse_ip_route("default via 10.0.0.1\n"), None);
    }

    #[test]
    fn proc_net_route_should_skip_non_default_rows() {
        assert_eq!(parse_proc_net_route(PROC_ROUTE).as_deref(), Some("eth0"));
        assert_eq!(parse_proc_net_route(""), None);
    }

    #[test]
    fn bsd_route_should_read_the_interface_line() {
        assert_eq!(parse_bsd_route(BSD_ROUTE).as_deref(), Some("en0"));
        assert_eq!(parse_bsd_route("route: writing to routing socket: not in table\n"), None);
    }

    #[test]
    fn netstat_should_yield_the_interface_address() {
        assert_eq!(
            parse_windows_netstat(NETSTAT),
            Some("10.88.88.149".parse().unwrap())
        );
        assert_eq!(parse_windows_netstat("Active Routes:\n"), None);
    }

    #[test]
    fn missing_tool_should_be_a_platform_error() {
        let err = run_tool("ifsift-no-such-routing-tool", &[]).unwrap_err();
        assert!(matches!(err, Error::Platform { source: Some(_), .. }));
    }
}
