// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};
use crate::models::sockaddr::{SockAddr, SockAddrOps, SockAddrType};

/// A filesystem path naming a UNIX domain socket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnixSock {
    path: String,
}

impl UnixSock {
    /// Accepts any non-empty path. The "looks like a path" heuristic only
    /// applies when the family is being guessed, see [`SockAddr::parse`].
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(Error::parse("", "UNIX"));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn cmp_address(&self, other: &SockAddr) -> Ordering {
        match other {
            SockAddr::Unix(b) => self.path.cmp(&b.path),
            _ => Ordering::Equal,
        }
    }
}

impl SockAddrOps for UnixSock {
    fn kind(&self) -> SockAddrType {
        SockAddrType::Unix
    }

    fn contains(&self, other: &SockAddr) -> bool {
        matches!(other, SockAddr::Unix(b) if b.path == self.path)
    }

    fn dial_packet_args(&self) -> (&'static str, String) {
        ("unixgram", self.path.clone())
    }

    fn dial_stream_args(&self) -> (&'static str, String) {
        ("unix", self.path.clone())
    }

    fn listen_packet_args(&self) -> (&'static str, String) {
        ("unixgram", self.path.clone())
    }

    fn listen_stream_args(&self) -> (&'static str, String) {
        ("unix", self.path.clone())
    }
}

impl fmt::Display for UnixSock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_should_quote_the_path() {
        let sock = UnixSock::new("/tmp/agent.sock").unwrap();
        assert_eq!(sock.to_string(), "\"/tmp/agent.sock\"");
        assert_eq!(sock.path(), "/tmp/agent.sock");
    }

    #[test]
    fn empty_path_should_fail() {
        assert!(UnixSock::new("").is_err());
    }

    #[test]
    fn args_should_use_unix_transports() {
        let sock = UnixSock::new("./s").unwrap();
        assert_eq!(sock.dial_stream_args(), ("unix", "./s".to_string()));
        assert_eq!(sock.listen_packet_args(), ("unixgram", "./s".to_string()));
    }

    #[test]
    fn contains_should_mean_same_path() {
        let a = UnixSock::new("/a").unwrap();
        assert!(a.contains(&SockAddr::Unix(a.clone())));
        assert!(!a.contains(&SockAddr::Unix(UnixSock::new("/b").unwrap())));
    }
}
