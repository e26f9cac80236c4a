// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use ifsift_common::config::Config;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::{FilterExt, filter_fn},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::terminal::{colors, logging};

/// Events with this target are command results. They go to stdout untouched.
pub const PRINT_TARGET: &str = "ifsift::print";

#[macro_export]
macro_rules! zprint {
    () => {
        $crate::zprint!("");
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "ifsift::print",
            raw_msg = %format_args!($($arg)*)
        );
    };
}

/// Installs the stdout result layer and the stderr log layer.
///
/// `RUST_LOG` overrides the log filter derived from `-q`/`-v`. It never hides
/// results.
pub fn init_logging(cfg: &Config) {
    if cfg.no_color {
        colored::control::set_override(false);
    }

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.default_log_directive()));

    let log_layer = tracing_subscriber::fmt::layer()
        .event_format(logging::IfsiftFormatter {
            max_verbosity: cfg.verbosity,
        })
        .with_writer(std::io::stderr)
        .with_filter(filter_layer.and(filter_fn(|meta| meta.target() != PRINT_TARGET)));

    let print_layer = tracing_subscriber::fmt::layer()
        .event_format(logging::IfsiftFormatter { max_verbosity: 0 })
        .with_writer(std::io::stdout)
        .with_filter(filter_fn(|meta| meta.target() == PRINT_TARGET));

    tracing_subscriber::registry()
        .with(log_layer)
        .with(print_layer)
        .init();
}

/// Prints `rows` as a two column table under an `Attribute | Value` header.
pub fn table(rows: &[(String, String)]) {
    let width = rows
        .iter()
        .map(|(key, _)| key.len())
        .chain(std::iter::once("Attribute".len()))
        .max()
        .unwrap_or(0);

    let header = "Attribute";
    zprint!(
        "{}{}  {}",
        header.color(colors::SECONDARY).bold(),
        " ".repeat(width - header.len()),
        "Value".color(colors::SECONDARY).bold()
    );
    for (key, value) in rows {
        let pad = " ".repeat(width - key.len());
        zprint!(
            "{}{}  {}",
            key.color(colors::PRIMARY),
            pad,
            value.color(colors::TEXT_DEFAULT)
        );
    }
}

/// One `key<TAB>value` line per row, without colour.
pub fn machine(rows: &[(String, String)]) {
    for (key, value) in rows {
        zprint!("{key}\t{value}");
    }
}

pub fn values(rows: &[(String, String)]) {
    for (_, value) in rows {
        zprint!("{value}");
    }
}

pub fn boolean(value: bool) {
    let text = value.to_string();
    let color = if value { colors::TRUE } else { colors::FALSE };
    zprint!("{}", text.color(color));
}

pub fn separator() {
    zprint!("{}", "---".color(colors::SEPARATOR));
}
