// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Stderr/stdout event formatting.
//!
//! One pass over an event's fields fills an `EventFields`; `zprint!` events
//! are written back verbatim, everything else gets a status glyph.

use std::fmt::Write as _;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::print::PRINT_TARGET;

pub struct IfsiftFormatter {
    pub max_verbosity: u8,
}

impl<S, N> FormatEvent<S, N> for IfsiftFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let mut fields = EventFields::default();
        event.record(&mut fields);

        if meta.target() == PRINT_TARGET {
            return writeln!(writer, "{}", fields.raw.unwrap_or_default());
        }
        if fields.verbosity > self.max_verbosity {
            return Ok(());
        }

        let (symbol, paint) = glyph(meta.level(), fields.status.as_deref());
        writeln!(writer, "{} {}", paint(symbol.into()), fields.line())
    }
}

type Paint = fn(ColoredString) -> ColoredString;

fn glyph(level: &Level, status: Option<&str>) -> (&'static str, Paint) {
    match *level {
        Level::TRACE => ("[ ]", |s| s.dimmed()),
        Level::DEBUG => ("[?]", |s| s.blue()),
        Level::INFO => match status {
            Some("info") => ("[»]", |s| s.cyan().bold()),
            _ => ("[+]", |s| s.green().bold()),
        },
        Level::WARN => ("[*]", |s| s.yellow().bold()),
        Level::ERROR => ("[-]", |s| s.red().bold()),
    }
}

#[derive(Debug, Default)]
struct EventFields {
    status: Option<String>,
    verbosity: u8,
    raw: Option<String>,
    message: String,
    /// Any other `key=value` pairs, in recording order.
    extra: Vec<(&'static str, String)>,
}

impl EventFields {
    fn line(&self) -> String {
        let mut line = self.message.clone();
        for (key, value) in &self.extra {
            let _ = write!(line, " {}={value}", key.italic());
        }
        line
    }
}

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let text = format!("{value:?}");
        match field.name() {
            "message" => self.message = text,
            "raw_msg" => self.raw = Some(text),
            "status" => self.status = Some(text),
            "verbosity" => {}
            name => self.extra.push((name, text)),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "status" => self.status = Some(value.to_string()),
            _ => self.record_debug(field, &value),
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "verbosity" => self.verbosity = u8::try_from(value).unwrap_or(u8::MAX),
            _ => self.record_debug(field, &value),
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "verbosity" => self.verbosity = u8::try_from(value.max(0)).unwrap_or(u8::MAX),
            _ => self.record_debug(field, &value),
        }
    }
}
