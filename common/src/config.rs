// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

/// Runtime options for one invocation of the tool.
///
/// The library itself is stateless; this struct only shapes how results and
/// diagnostics are presented. It is built from the command line.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Silences informational diagnostics.
    ///
    /// # Levels
    /// * **0** (Default): warnings and errors are logged to stderr.
    /// * **1** and above: only errors are logged.
    ///
    /// Command results on stdout are never affected.
    pub quiet: u8,

    /// Amount of diagnostic detail, mapped from `-v`.
    ///
    /// * **0** (Default): warnings only.
    /// * **1**: debug events, e.g. the route tool consulted for the default interface.
    /// * **2**: debug events tagged with `verbosity = 2`, e.g. every template source call.
    pub verbosity: u8,

    /// Strips ANSI colour from human readable output.
    pub no_color: bool,
}

impl Config {
    /// The `tracing` directive used when `RUST_LOG` is not set.
    pub fn default_log_directive(&self) -> &'static str {
        match (self.quiet, self.verbosity) {
            (q, _) if q > 0 => "error",
            (_, 0) => "warn",
            _ => "debug",
        }
    }
}
