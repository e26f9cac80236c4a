// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use anyhow::{Context, bail};
use ifsift_common::debug;
use ifsift_common::models::{IPv4Addr, IPv6Addr, SockAddr, SockAddrOps, UnixSock};
use ifsift_core::attr;

use crate::commands::DumpArgs;
use crate::terminal::print;
use crate::zprint;

type Row = (String, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Any,
    IPv4,
    IPv6,
    Ip,
    Unix,
}

impl Mode {
    fn from_args(args: &DumpArgs) -> anyhow::Result<Self> {
        let forced: Vec<Mode> = [
            (args.ipv4, Mode::IPv4),
            (args.ipv6, Mode::IPv6),
            (args.ip, Mode::Ip),
            (args.unix, Mode::Unix),
        ]
        .into_iter()
        .filter_map(|(set, mode)| set.then_some(mode))
        .collect();

        match forced.as_slice() {
            [] => Ok(Mode::Any),
            [mode] => Ok(*mode),
            _ => bail!("-4, -6, -i and -u are mutually exclusive"),
        }
    }

    fn parse(self, input: &str) -> ifsift_common::error::Result<SockAddr> {
        match self {
            Mode::Any => SockAddr::parse(input),
            Mode::IPv4 => IPv4Addr::parse(input).map(SockAddr::IPv4),
            Mode::IPv6 => IPv6Addr::parse(input).map(SockAddr::IPv6),
            Mode::Ip => SockAddr::parse_ip(input),
            Mode::Unix => UnixSock::new(input).map(SockAddr::Unix),
        }
    }
}

pub fn dump(args: &DumpArgs) -> anyhow::Result<()> {
    let mode = Mode::from_args(args)?;
    for name in &args.only {
        if !is_dev_row(name) {
            attr::ensure_known(name)?;
        }
    }

    // Every argument must parse before anything is printed.
    let addrs = args
        .addrs
        .iter()
        .map(|input| {
            mode.parse(input)
                .with_context(|| format!("cannot dump {input:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    debug!("Dumping {} addresses as {:?}", addrs.len(), mode);

    for (idx, sa) in addrs.iter().enumerate() {
        let rows = rows(sa, &args.only);
        match (args.machine, args.values_only) {
            (_, true) => print::values(&rows),
            (true, false) => print::machine(&rows),
            (false, false) => {
                if idx > 0 {
                    zprint!();
                }
                print::table(&rows);
            }
        }
    }
    Ok(())
}

const DEV_ROWS: [&str; 4] = ["DialPacket", "DialStream", "ListenPacket", "ListenStream"];

fn is_dev_row(name: &str) -> bool {
    DEV_ROWS.iter().any(|row| row.eq_ignore_ascii_case(name))
}

/// Attribute rows in display order followed by the dial/listen rows, restricted
/// to `only` when it is not empty.
fn rows(sa: &SockAddr, only: &[String]) -> Vec<Row> {
    let wanted = |name: &str| only.is_empty() || only.iter().any(|o| o.eq_ignore_ascii_case(name));

    let attrs = attr::sock_addr_attr_names(sa)
        .into_iter()
        .filter(|name| wanted(name))
        .map(|name| (name.to_string(), attr::sock_addr_attr(sa, name)));

    let dev = [
        sa.dial_packet_args(),
        sa.dial_stream_args(),
        sa.listen_packet_args(),
        sa.listen_stream_args(),
    ]
    .into_iter()
    .zip(DEV_ROWS)
    .filter(|(_, name)| wanted(name))
    .map(|((transport, endpoint), name)| (name.to_string(), format!("{transport:?} {endpoint:?}")));

    attrs.chain(dev).collect()
}
