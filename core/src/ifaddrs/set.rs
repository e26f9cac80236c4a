// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use ifsift_common::error::{Error, Result};
use ifsift_common::models::IfAddr;

use crate::attr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    Address,
    Name,
}

impl UniqueKey {
    fn value(self, ifaddr: &IfAddr) -> String {
        match self {
            UniqueKey::Address => ifaddr.sock_addr.to_string(),
            UniqueKey::Name => ifaddr.interface.name.clone(),
        }
    }
}

impl FromStr for UniqueKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "address" => Ok(UniqueKey::Address),
            "name" => Ok(UniqueKey::Name),
            _ => Err(Error::selector(format!("unsupported unique constraint {s:?}"))),
        }
    }
}

/// Drops records equal to their predecessor under `selector`.
///
/// Only adjacent duplicates go, so the list is expected to be sorted first.
pub fn unique(selector: &str, ifaddrs: &[IfAddr]) -> Result<Vec<IfAddr>> {
    let key: UniqueKey = selector.parse()?;

    let mut kept = Vec::with_capacity(ifaddrs.len());
    let mut last: Option<String> = None;
    for ifaddr in ifaddrs {
        let value = key.value(ifaddr);
        if last.as_ref() == Some(&value) {
            continue;
        }
        last = Some(value);
        kept.push(ifaddr.clone());
    }
    Ok(kept)
}

/// The first `n` records, or all of them when there are fewer.
pub fn limit(n: usize, ifaddrs: &[IfAddr]) -> Vec<IfAddr> {
    ifaddrs.iter().take(n).cloned().collect()
}

/// Skips `k` records from the front, or keeps the last `|k|` when negative.
pub fn offset(k: i64, ifaddrs: &[IfAddr]) -> Result<Vec<IfAddr>> {
    let len = ifaddrs.len();
    let skip = usize::try_from(k.unsigned_abs()).unwrap_or(usize::MAX);
    if skip > len {
        return Err(Error::Range { offset: k, len });
    }

    let tail = if k < 0 {
        &ifaddrs[len - skip..]
    } else {
        &ifaddrs[skip..]
    };
    Ok(tail.to_vec())
}

pub fn reverse(ifaddrs: &[IfAddr]) -> Vec<IfAddr> {
    ifaddrs.iter().rev().cloned().collect()
}

/// Renders attribute `name` of every record and joins the values with `sep`.
pub fn join(name: &str, sep: &str, ifaddrs: &[IfAddr]) -> Result<String> {
    attr::ensure_known(name)?;
    let values: Vec<String> = ifaddrs
        .iter()
        .map(|ifaddr| attr::if_addr_attr(ifaddr, name))
        .collect();
    Ok(values.join(sep))
}
