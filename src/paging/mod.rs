// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

pub mod flags;
mod repr;

pub use flags::Flags;
pub use repr::{Level, PageTable, PageTableEntry, PhysicalAddress, ENTRIES, PAGE_SHIFT, PAGE_SIZE, PFN_SHIFT};

/// Turns the physical address of a page table into something that can be
/// read.
///
/// Implementations must only hand out references to memory that is valid to
/// read as a [`PageTable`] for as long as the borrow lives, whatever address
/// they're given. Anything they can't vouch for should come back as `None`,
/// which the walker treats the same as a table full of zeroes.
pub trait TableSource {
    fn table(&self, address: PhysicalAddress) -> Option<&PageTable>;
}

impl<T: TableSource + ?Sized> TableSource for &T {
    fn table(&self, address: PhysicalAddress) -> Option<&PageTable> {
        (**self).table(address)
    }
}

/// Physical memory mapped linearly into the address space at a fixed offset.
/// An offset of zero is an identity map.
#[derive(Debug, Clone, Copy)]
pub struct DirectMap {
    offset: u64,
}

impl DirectMap {
    /// # Safety
    ///
    /// Every page aligned physical address a page table could name, plus
    /// `offset`, must be readable for as long as the [`DirectMap`] is in use.
    pub const unsafe fn new(offset: u64) -> Self {
        Self { offset }
    }

    /// # Safety
    ///
    /// See [`DirectMap::new`].
    pub const unsafe fn identity() -> Self {
        Self { offset: 0 }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn phys2virt(&self, address: PhysicalAddress) -> Option<usize> {
        let virt = address.as_u64().checked_add(self.offset)?;
        usize::try_from(virt).ok()
    }
}

impl TableSource for DirectMap {
    fn table(&self, address: PhysicalAddress) -> Option<&PageTable> {
        if !address.is_page_aligned() {
            return None;
        }

        match self.phys2virt(address)? {
            0 => None,
            // Safety: the caller of `DirectMap::new` promised this is mapped,
            // and it's aligned for `PageTable`
            virt => Some(unsafe { &*(virt as *const PageTable) }),
        }
    }
}
