// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! Sv39 page table dumper.
//!
//! Walks the page table rooted at `satp` and writes one line per populated
//! entry to a [`DumpSink`]. The walk is read-only and never reports an error:
//! a bogus `satp` or an unresolvable table only shows up as a short or odd
//! looking trace.
//!
//! The page table must not be modified while a dump is running. Nothing here
//! takes a lock on it.

#![no_std]
#![allow(clippy::match_bool)]

#[cfg(feature = "platform.virt")]
#[macro_use]
pub mod console;

pub mod csr;
pub mod dump;
pub mod paging;
pub mod units;
pub mod walk;

pub use csr::satp::Satp;
#[cfg(target_arch = "riscv64")]
pub use dump::dump_current;
pub use dump::{dump, DumpSink, EntryLine, FlagString, LogSink};
pub use paging::{DirectMap, Flags, Level, PageTable, PageTableEntry, PhysicalAddress, TableSource};
pub use walk::{Visit, Walk};
