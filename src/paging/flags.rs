// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

/// The low eight bits of a page table entry
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    pub const NONE: Flags = Flags(0);
    pub const VALID: Flags = Flags(0b0000_0001);
    pub const READ: Flags = Flags(0b0000_0010);
    pub const WRITE: Flags = Flags(0b0000_0100);
    pub const EXECUTE: Flags = Flags(0b0000_1000);
    pub const USER: Flags = Flags(0b0001_0000);
    pub const GLOBAL: Flags = Flags(0b0010_0000);
    pub const ACCESSED: Flags = Flags(0b0100_0000);
    pub const DIRTY: Flags = Flags(0b1000_0000);

    /// Every flag paired with the letter the dump uses for it, in the order
    /// they appear in a dump line
    pub const ORDERED: [(Flags, char); 8] = [
        (Self::VALID, 'V'),
        (Self::READ, 'R'),
        (Self::WRITE, 'W'),
        (Self::EXECUTE, 'X'),
        (Self::USER, 'U'),
        (Self::GLOBAL, 'G'),
        (Self::ACCESSED, 'A'),
        (Self::DIRTY, 'D'),
    ];

    pub const fn new(n: u8) -> Self {
        Self(n)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Any of R/W/X set means the entry maps memory instead of pointing at
    /// another table
    pub fn is_leaf(self) -> bool {
        self & Self::READ || self & Self::WRITE || self & Self::EXECUTE
    }
}

impl core::fmt::Debug for Flags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Flags({})", crate::dump::FlagString(*self))
    }
}

impl core::ops::BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = Self(self.0 | rhs.0);
    }
}

impl core::ops::BitAnd for Flags {
    type Output = bool;

    fn bitand(self, rhs: Self) -> Self::Output {
        (self.0 & rhs.0) == rhs.0
    }
}
