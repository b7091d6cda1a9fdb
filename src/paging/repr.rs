// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use crate::{paging::flags::Flags, units::Units};
use static_assertions::{assert_eq_size, const_assert_eq};

pub const PAGE_SHIFT: u32 = 12;
pub const PAGE_SIZE: u64 = 1 << PAGE_SHIFT;
/// Entries start their PPN at bit 10
pub const PFN_SHIFT: u32 = 10;
pub const ENTRIES: usize = 512;

#[repr(C, align(4096))]
pub struct PageTable {
    pub entries: [PageTableEntry; ENTRIES],
}

assert_eq_size!(PageTable, [u8; 4096]);
assert_eq_size!(PageTableEntry, u64);
const_assert_eq!(core::mem::align_of::<PageTable>() as u64, PAGE_SIZE);

impl Default for PageTable {
    fn default() -> Self {
        Self { entries: [PageTableEntry::default(); ENTRIES] }
    }
}

impl core::ops::Index<usize> for PageTable {
    type Output = PageTableEntry;

    fn index(&self, idx: usize) -> &PageTableEntry {
        &self.entries[idx]
    }
}

impl core::ops::IndexMut<usize> for PageTable {
    fn index_mut(&mut self, idx: usize) -> &mut PageTableEntry {
        &mut self.entries[idx]
    }
}

#[derive(Default, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct PageTableEntry(u64);

impl PageTableEntry {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Builds an entry pointing at `pfn` with the given flags
    pub const fn from_parts(pfn: u64, flags: Flags) -> Self {
        Self((pfn << PFN_SHIFT) | flags.value() as u64)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Zero entries are unpopulated. Note that a non-zero entry with the
    /// valid bit clear still counts as populated.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn flags(self) -> Flags {
        Flags::new(self.0 as u8)
    }

    /// `raw[63:10]`. The reserved and PBMT bits come along with it.
    pub const fn pfn(self) -> u64 {
        self.0 >> PFN_SHIFT
    }

    pub fn is_leaf(self) -> bool {
        self.flags().is_leaf()
    }

    /// Whatever the entry points at, either the next level table or the
    /// mapped page
    pub const fn target(self) -> PhysicalAddress {
        PhysicalAddress::from_pfn(self.pfn())
    }
}

impl core::fmt::Debug for PageTableEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PageTableEntry(")?;
        match (self.is_empty(), self.is_leaf()) {
            (true, _) => write!(f, "Empty")?,
            (false, true) => write!(f, "Leaf, flags={:?}, target={:?}", self.flags(), self.target())?,
            (false, false) => write!(f, "Branch, flags={:?}, next_level={:?}", self.flags(), self.target())?,
        }
        write!(f, ")")
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PhysicalAddress(u64);

impl PhysicalAddress {
    pub const fn new(addr: u64) -> Self {
        PhysicalAddress(addr)
    }

    /// Bits shifted past the top of the word are dropped, same as the
    /// hardware
    pub const fn from_pfn(pfn: u64) -> Self {
        PhysicalAddress(pfn << PAGE_SHIFT)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub const fn pfn(self) -> u64 {
        self.0 >> PAGE_SHIFT
    }

    pub const fn is_page_aligned(self) -> bool {
        self.0 % PAGE_SIZE == 0
    }
}

impl core::fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PhysicalAddress({:#x})", self.0)
    }
}

impl core::fmt::LowerHex for PhysicalAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Sv39 table levels, numbered the way the privileged ISA numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Level {
    Pte = 0,
    Pmd = 1,
    #[default]
    Pgd = 2,
}

impl Level {
    pub const fn top_level() -> Self {
        Level::Pgd
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Level::Pgd => "PGD",
            Level::Pmd => "PMD",
            Level::Pte => "PTE",
        }
    }

    /// The level a non-leaf entry at this level points at
    pub const fn next(self) -> Option<Self> {
        match self {
            Level::Pgd => Some(Level::Pmd),
            Level::Pmd => Some(Level::Pte),
            Level::Pte => None,
        }
    }

    /// Size of the region a leaf entry at this level maps
    pub fn page_size(self) -> u64 {
        match self {
            Level::Pgd => 1u64.gib(),
            Level::Pmd => 2u64.mib(),
            Level::Pte => 4u64.kib(),
        }
    }
}
