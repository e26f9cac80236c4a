// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # IfAddr Algebra
//!
//! Pure list operations over [`IfAddr`](ifsift_common::models::IfAddr) records.
//! Every operation takes a slice and returns a fresh list, so the steps can be
//! chained in any order by the template pipeline or by library callers.
//!
//! * [`filter`] keeps or drops records matching a selector.
//! * [`sort`] orders records by a comma separated list of keys.
//! * [`set`] slices, deduplicates, reverses and joins records.

pub mod filter;
pub mod set;
pub mod sort;

pub use filter::{exclude, include, partition};
pub use set::{join, limit, offset, reverse, unique};
pub use sort::sort_by;
