// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

pub mod interface;
pub mod ipv4;
pub mod ipv6;
pub mod sockaddr;
pub mod unix;

pub use interface::{IfAddr, Interface, InterfaceFlags};
pub use ipv4::IPv4Addr;
pub use ipv6::IPv6Addr;
pub use sockaddr::{IpAddrOps, SockAddr, SockAddrOps, SockAddrType};
pub use unix::UnixSock;
