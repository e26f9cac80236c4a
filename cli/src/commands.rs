// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! The schema for user input. Execution lives in one submodule per command;
//! the flags and help text are kept together here.
//!
//! * [`CommandLine`]: global flags that apply to every command (logging, colour).
//! * [`Commands`]: the operation to run.
//!
//! `From<&CommandLine> for Config` is the only place where flags turn into
//! runtime options, so the libraries never see `clap` types.

pub mod dump;
pub mod eval;
pub mod rfc;

use clap::{ArgAction, Parser, Subcommand};
use ifsift_common::config::Config;

#[derive(Parser)]
#[command(name = "ifsift", version)]
#[command(about = "Inspect socket addresses and select host interface addresses.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Only log errors (-q)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Increase logging detail (-v: debug logs, -vv: every template call)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Disable coloured output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse addresses and print their attributes
    #[command(alias = "d")]
    Dump(DumpArgs),

    /// Evaluate templates against the interfaces of this host
    #[command(alias = "e")]
    Eval(EvalArgs),

    /// List the known RFCs or test addresses against one
    #[command(subcommand)]
    Rfc(RfcCommand),
}

#[derive(clap::Args)]
pub struct DumpArgs {
    /// Machine readable output: one `key<TAB>value` line per attribute
    #[arg(short = 'H')]
    pub machine: bool,

    /// Print values only
    #[arg(short = 'n')]
    pub values_only: bool,

    /// Parse every argument as IPv4
    #[arg(short = '4')]
    pub ipv4: bool,

    /// Parse every argument as IPv6
    #[arg(short = '6')]
    pub ipv6: bool,

    /// Parse every argument as an IP address of either family
    #[arg(short = 'i')]
    pub ip: bool,

    /// Parse every argument as a UNIX socket path
    #[arg(short = 'u')]
    pub unix: bool,

    /// Only print the named attribute (repeatable)
    #[arg(short = 'o', value_name = "ATTR")]
    pub only: Vec<String>,

    #[arg(value_name = "ADDRS", num_args(1..), required = true)]
    pub addrs: Vec<String>,
}

#[derive(clap::Args)]
pub struct EvalArgs {
    /// Show each template next to its output
    #[arg(short = 'd')]
    pub debug: bool,

    /// Do not separate outputs with newlines
    #[arg(short = 'n')]
    pub no_newline: bool,

    /// Template strings; `-` reads one from stdin
    #[arg(value_name = "TEMPLATES", num_args(1..), required = true)]
    pub templates: Vec<String>,
}

#[derive(Subcommand)]
pub enum RfcCommand {
    /// Print every known RFC number
    List,

    /// Print whether each address falls inside the RFC's blocks
    Check {
        #[arg(value_name = "RFC")]
        rfc: u32,

        #[arg(value_name = "ADDRS", num_args(1..), required = true)]
        addrs: Vec<String>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        Self {
            quiet: cmd.quiet,
            verbosity: cmd.verbosity,
            no_color: cmd.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_should_map_into_config() {
        let cmd = CommandLine::parse_from(["ifsift", "-vv", "--no-color", "rfc", "list"]);
        let cfg = Config::from(&cmd);
        assert_eq!(cfg.verbosity, 2);
        assert_eq!(cfg.quiet, 0);
        assert!(cfg.no_color);
    }

    #[test]
    fn dump_should_collect_repeated_attribute_filters() {
        let cmd = CommandLine::parse_from([
            "ifsift", "dump", "-H", "-o", "address", "-o", "port", "1.2.3.4:80",
        ]);
        let Commands::Dump(args) = cmd.command else {
            panic!("expected dump");
        };
        assert!(args.machine);
        assert_eq!(args.only, vec!["address", "port"]);
        assert_eq!(args.addrs, vec!["1.2.3.4:80"]);
    }

    #[test]
    fn eval_should_require_a_template() {
        assert!(CommandLine::try_parse_from(["ifsift", "eval"]).is_err());
    }

    #[test]
    fn rfc_check_should_parse_the_number() {
        let cmd = CommandLine::parse_from(["ifsift", "rfc", "check", "1918", "10.0.0.1"]);
        assert!(matches!(
            cmd.command,
            Commands::Rfc(RfcCommand::Check { rfc: 1918, .. })
        ));
    }
}
