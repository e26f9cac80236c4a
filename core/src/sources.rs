// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Interface Sources
//!
//! Canned starting points for a pipeline. Each one is itself a composition of
//! the algebra in [`crate::ifaddrs`] over what a repository reports.

use ifsift_common::error::Result;
use ifsift_common::models::IfAddr;
use ifsift_common::rfc::PRIVATE_RFC;
use ifsift_common::system::InterfaceRepository;

use crate::attr;
use crate::ifaddrs::{exclude, include, join, limit, sort_by};

pub fn all_interfaces(repo: &dyn InterfaceRepository) -> Result<Vec<IfAddr>> {
    repo.all_interfaces()
}

pub fn default_interfaces(repo: &dyn InterfaceRepository) -> Result<Vec<IfAddr>> {
    repo.default_interfaces()
}

/// IP addresses on the default interface inside RFC 6890, IPv4 first, larger networks first.
pub fn private_interfaces(repo: &dyn InterfaceRepository) -> Result<Vec<IfAddr>> {
    let candidates = default_ips(repo)?;
    include("rfc", &PRIVATE_RFC.to_string(), &candidates)
}

/// IP addresses on the default interface outside RFC 6890, ordered like [`private_interfaces`].
pub fn public_interfaces(repo: &dyn InterfaceRepository) -> Result<Vec<IfAddr>> {
    let candidates = default_ips(repo)?;
    exclude("rfc", &PRIVATE_RFC.to_string(), &candidates)
}

/// The first private address, or `""` when there is none.
pub fn private_ip(repo: &dyn InterfaceRepository) -> Result<String> {
    Ok(first_address(&private_interfaces(repo)?))
}

/// The first public address, or `""` when there is none.
pub fn public_ip(repo: &dyn InterfaceRepository) -> Result<String> {
    Ok(first_address(&public_interfaces(repo)?))
}

/// Every private address, space separated.
pub fn private_ips(repo: &dyn InterfaceRepository) -> Result<String> {
    join("address", " ", &private_interfaces(repo)?)
}

/// Every public address, space separated.
pub fn public_ips(repo: &dyn InterfaceRepository) -> Result<String> {
    join("address", " ", &public_interfaces(repo)?)
}

/// The first forwardable address on an interface whose name matches `name_regex`.
pub fn interface_ip(repo: &dyn InterfaceRepository, name_regex: &str) -> Result<String> {
    let named = include("name", name_regex, &repo.all_interfaces()?)?;
    let ips = include("type", "ip", &named)?;
    let forwardable = include("flag", "forwardable", &ips)?;
    let sorted = sort_by("type,size", &forwardable)?;
    Ok(first_address(&sorted))
}

fn default_ips(repo: &dyn InterfaceRepository) -> Result<Vec<IfAddr>> {
    let defaults = repo.default_interfaces()?;
    let ips = include("type", "ip", &defaults)?;
    sort_by("type,size", &ips)
}

fn first_address(ifaddrs: &[IfAddr]) -> String {
    limit(1, ifaddrs)
        .first()
        .map(|ifaddr| attr::if_addr_attr(ifaddr, "address"))
        .unwrap_or_default()
}
