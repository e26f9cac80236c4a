// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use crate::error::Result;
use crate::models::interface::IfAddr;

/// Defines the contract for reading the host's interface state.
///
/// The production implementation queries the OS; tests substitute a fixed
/// list. Each call is a fresh snapshot, nothing is cached between calls.
pub trait InterfaceRepository {
    /// Every `(interface, address)` pair currently on the host.
    fn all_interfaces(&self) -> Result<Vec<IfAddr>>;

    /// Name of the interface carrying the default route.
    fn default_interface_name(&self) -> Result<String>;

    /// The records of [`all_interfaces`](Self::all_interfaces) that belong to
    /// the default interface, in enumeration order.
    fn default_interfaces(&self) -> Result<Vec<IfAddr>> {
        let name = self.default_interface_name()?;
        let all = self.all_interfaces()?;
        Ok(all.into_iter().filter(|ifaddr| ifaddr.name() == name).collect())
    }
}
