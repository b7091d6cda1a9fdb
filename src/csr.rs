// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

pub mod satp {
    use crate::paging::PhysicalAddress;

    /// Mask for the root page table PPN, `satp[43:0]`
    pub const PPN_MASK: u64 = (1 << 44) - 1;

    /// A snapshot of the `satp` CSR
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Satp(u64);

    impl Satp {
        pub const fn new(value: u64) -> Self {
            Self(value)
        }

        pub const fn value(self) -> u64 {
            self.0
        }

        pub const fn root_ppn(self) -> u64 {
            self.0 & PPN_MASK
        }

        /// Physical address of the root (level 2) table. Not validated in any
        /// way, a zero or garbage `satp` produces an equally bogus address.
        pub const fn root_table(self) -> PhysicalAddress {
            PhysicalAddress::from_pfn(self.root_ppn())
        }

        pub const fn asid(self) -> u16 {
            ((self.0 >> 44) & 0xFFFF) as u16
        }

        /// `None` for encodings the privileged ISA reserves
        pub const fn mode(self) -> Option<SatpMode> {
            match self.0 >> 60 {
                0 => Some(SatpMode::Bare),
                8 => Some(SatpMode::Sv39),
                9 => Some(SatpMode::Sv48),
                10 => Some(SatpMode::Sv57),
                11 => Some(SatpMode::Sv64),
                _ => None,
            }
        }
    }

    impl core::fmt::Debug for Satp {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.debug_struct("Satp")
                .field("mode", &self.mode())
                .field("asid", &self.asid())
                .field("root_table", &self.root_table())
                .finish()
        }
    }

    #[cfg(target_arch = "riscv64")]
    #[inline(always)]
    pub fn read() -> Satp {
        let value: u64;
        unsafe { core::arch::asm!("csrr {}, satp", out(reg) value) };

        Satp(value)
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u64)]
    pub enum SatpMode {
        Bare = 0,
        Sv39 = 8,
        Sv48 = 9,
        Sv57 = 10,
        Sv64 = 11,
    }
}
