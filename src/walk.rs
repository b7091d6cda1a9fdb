// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    paging::{Level, PageTable, PageTableEntry, PhysicalAddress, TableSource, ENTRIES},
    units::ByteSize,
};
use tinyvec::ArrayVec;

/// A populated entry found during a [`Walk`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub level: Level,
    pub index: usize,
    pub entry: PageTableEntry,
}

#[derive(Default, Clone, Copy)]
struct Cursor<'a> {
    table: Option<&'a PageTable>,
    level: Level,
    next: usize,
}

/// Depth-first walk over every non-zero entry reachable from a root table.
///
/// Entries within a table come out in index order, and a branch entry is
/// always followed by everything below it before its next sibling. Leaf
/// entries at levels 2 and 1 are superpages and aren't descended into; their
/// alignment isn't checked.
pub struct Walk<'a, S: TableSource + ?Sized> {
    source: &'a S,
    // One cursor per level, Sv39 tables can't nest any deeper
    stack: ArrayVec<[Cursor<'a>; 3]>,
}

impl<'a, S: TableSource + ?Sized> Walk<'a, S> {
    /// Starts a walk at the level 2 table at `root`. If `source` can't
    /// resolve it the walk is empty.
    pub fn new(source: &'a S, root: PhysicalAddress) -> Self {
        let mut this = Self { source, stack: ArrayVec::default() };

        match source.table(root) {
            Some(table) => this.stack.push(Cursor { table: Some(table), level: Level::top_level(), next: 0 }),
            None => log::warn!("Root page table at {:#x} isn't accessible, nothing to walk", root),
        }

        this
    }

    /// Starts a walk at an already resolved level 2 table
    pub fn from_root(source: &'a S, root: &'a PageTable) -> Self {
        let mut stack = ArrayVec::default();
        stack.push(Cursor { table: Some(root), level: Level::top_level(), next: 0 });

        Self { source, stack }
    }

    fn descend(&mut self, level: Level, entry: PageTableEntry) {
        let source: &'a S = self.source;
        let address = entry.target();

        match source.table(address) {
            Some(table) => {
                log::trace!("Descending into {} table at {:#x}", level.tag(), address);
                self.stack.push(Cursor { table: Some(table), level, next: 0 });
            }
            None => log::warn!("{} table at {:#x} isn't accessible, skipping it", level.tag(), address),
        }
    }
}

impl<S: TableSource + ?Sized> Iterator for Walk<'_, S> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        loop {
            let step = match self.stack.last_mut() {
                Some(Cursor { table: Some(table), level, next }) if *next < ENTRIES => {
                    *next += 1;
                    Some((*table, *level, *next - 1))
                }
                Some(_) => None,
                None => return None,
            };

            let (table, level, index) = match step {
                Some(step) => step,
                // Table exhausted, pick up where its parent left off
                None => {
                    self.stack.pop();
                    continue;
                }
            };

            let entry = table[index];
            if entry.is_empty() {
                continue;
            }

            if let Some(next_level) = level.next() {
                match entry.is_leaf() {
                    true => log::trace!(
                        "{} superpage at idx={} -> {:#x}",
                        ByteSize(level.page_size()),
                        index,
                        entry.target()
                    ),
                    false => self.descend(next_level, entry),
                }
            }

            return Some(Visit { level, index, entry });
        }
    }
}
