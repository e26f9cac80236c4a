// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use anyhow::Context;
use ifsift_common::models::SockAddr;
use ifsift_common::rfc;

use crate::terminal::print;
use crate::zprint;

pub fn list() -> anyhow::Result<()> {
    for number in rfc::known_rfcs().keys() {
        zprint!("{number}");
    }
    Ok(())
}

pub fn check(number: u32, addrs: &[String]) -> anyhow::Result<()> {
    for verdict in classify(number, addrs)? {
        print::boolean(verdict);
    }
    Ok(())
}

/// Parses every address up front so a bad one prints nothing.
fn classify(number: u32, addrs: &[String]) -> anyhow::Result<Vec<bool>> {
    let parsed = addrs
        .iter()
        .map(|input| SockAddr::parse(input).with_context(|| format!("cannot check {input:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    parsed
        .iter()
        .map(|sa| rfc::is_rfc(number, sa).map_err(anyhow::Error::from))
        .collect()
}
