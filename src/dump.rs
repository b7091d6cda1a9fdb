// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    csr::satp::Satp,
    paging::{Flags, Level, PageTableEntry, TableSource},
    walk::{Visit, Walk},
};
use core::fmt;

pub const BANNER_START: &str = "=== PageTable Dump (Sv39) ===";
pub const BANNER_END: &str = "=== PageTable Dump End ===";

/// Somewhere to put dump output, one line at a time. Lines don't include a
/// trailing newline.
pub trait DumpSink {
    fn write_line(&mut self, line: fmt::Arguments<'_>);
}

impl<F: FnMut(fmt::Arguments<'_>)> DumpSink for F {
    fn write_line(&mut self, line: fmt::Arguments<'_>) {
        (*self)(line)
    }
}

/// Forwards every line to the `log` facade at a fixed level
#[derive(Debug, Clone, Copy)]
pub struct LogSink(pub log::Level);

impl Default for LogSink {
    fn default() -> Self {
        Self(log::Level::Info)
    }
}

impl DumpSink for LogSink {
    fn write_line(&mut self, line: fmt::Arguments<'_>) {
        log::log!(self.0, "{}", line);
    }
}

/// The `VRWXUGAD` flag column. Clear bits show up as `-`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FlagString(pub Flags);

impl FlagString {
    /// Reverses the [`Display`](fmt::Display) impl. Anything that isn't
    /// exactly eight characters of positional letters or `-` is rejected.
    pub fn parse(s: &str) -> Option<Flags> {
        let mut chars = s.chars();
        let mut flags = Flags::NONE;

        for (flag, letter) in Flags::ORDERED {
            match chars.next()? {
                c if c == letter => flags |= flag,
                '-' => {}
                _ => return None,
            }
        }

        match chars.next() {
            Some(_) => None,
            None => Some(flags),
        }
    }
}

impl fmt::Display for FlagString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, letter) in Flags::ORDERED {
            let c = match self.0 & flag {
                true => letter,
                false => '-',
            };
            fmt::Write::write_char(f, c)?;
        }

        Ok(())
    }
}

impl fmt::Debug for FlagString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// One line of the dump:
///
/// ```text
/// [PGD][L2] idx=000 PFN=0x1234 flags=VR------ raw=0x48d003
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLine {
    pub level: Level,
    pub index: usize,
    pub entry: PageTableEntry,
}

impl From<Visit> for EntryLine {
    fn from(visit: Visit) -> Self {
        Self { level: visit.level, index: visit.index, entry: visit.entry }
    }
}

impl fmt::Display for EntryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][L{}] idx={:03} PFN={:#x} flags={} raw={:#x}",
            self.level.tag(),
            self.level.number(),
            self.index,
            self.entry.pfn(),
            FlagString(self.entry.flags()),
            self.entry.raw(),
        )
    }
}

/// Dumps the page table `satp` points at into `sink`.
///
/// `satp` isn't validated: a zero or nonsense value just produces an empty or
/// nonsense dump. Same goes for tables `tables` can't resolve, which are
/// skipped. The table must not change underneath the walk.
pub fn dump<S, W>(satp: Satp, tables: &S, sink: &mut W)
where
    S: TableSource + ?Sized,
    W: DumpSink + ?Sized,
{
    log::debug!("Dumping page table: {:?}", satp);
    if satp.mode() != Some(crate::csr::satp::SatpMode::Sv39) {
        log::debug!("satp mode isn't Sv39, walking it as Sv39 anyway");
    }

    let root_ppn = satp.root_ppn();
    let root_pa = satp.root_table();

    sink.write_line(format_args!("{}", BANNER_START));
    sink.write_line(format_args!("satp={:#x} root_ppn={:#x} root_pa={:#x}", satp.value(), root_ppn, root_pa));

    let mut count = 0usize;
    for visit in Walk::new(tables, root_pa) {
        sink.write_line(format_args!("{}", EntryLine::from(visit)));
        count += 1;
    }

    log::debug!("Page table dump done, {} populated entries", count);
    sink.write_line(format_args!("{}", BANNER_END));
}

/// [`dump`] for whatever table the hart is currently translating through
#[cfg(target_arch = "riscv64")]
pub fn dump_current<S, W>(tables: &S, sink: &mut W)
where
    S: TableSource + ?Sized,
    W: DumpSink + ?Sized,
{
    dump(crate::csr::satp::read(), tables, sink)
}
