// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # ifsift CLI Entry Point
//!
//! Bootstraps logging, maps the command line into a [`Config`], dispatches to
//! the command modules and turns their outcome into an [`ExitCode`].
//!
//! Results go to stdout through `zprint!`; diagnostics go to stderr. Any error
//! a command returns is logged here once and exits with status 1.

mod commands;
mod terminal;

use std::process::ExitCode;

use ifsift_common::{config::Config, error};

use crate::{
    commands::{CommandLine, Commands, RfcCommand, dump, eval, rfc},
    terminal::print,
};

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let cfg = Config::from(&commands);
    print::init_logging(&cfg);

    let result = match &commands.command {
        Commands::Dump(args) => dump::dump(args),
        Commands::Eval(args) => eval::eval(args),
        Commands::Rfc(RfcCommand::List) => rfc::list(),
        Commands::Rfc(RfcCommand::Check { rfc: number, addrs }) => {
            rfc::check(*number, addrs)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
