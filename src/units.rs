// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

pub trait Units: core::ops::Mul<Self, Output = Self> + Sized {
    const KIB: Self;

    #[must_use]
    fn kib(self) -> Self {
        self * <Self as Units>::KIB
    }

    #[must_use]
    fn mib(self) -> Self {
        self * Self::KIB * Self::KIB
    }

    #[must_use]
    fn gib(self) -> Self {
        self * Self::KIB * Self::KIB * Self::KIB
    }
}

macro_rules! impl_units {
    ($($t:ty),+) => {
        $(
            impl Units for $t {
                const KIB: Self = 1024;
            }
        )+
    };
}

impl_units!(u32, u64, usize);

/// Pretty-prints a byte count using the largest binary unit that divides it
/// evenly, e.g. `2 MiB`
#[derive(Debug, Clone, Copy)]
pub struct ByteSize(pub u64);

impl core::fmt::Display for ByteSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            0 => write!(f, "0 B"),
            n if n % 1u64.gib() == 0 => write!(f, "{} GiB", n / 1u64.gib()),
            n if n % 1u64.mib() == 0 => write!(f, "{} MiB", n / 1u64.mib()),
            n if n % 1u64.kib() == 0 => write!(f, "{} KiB", n / 1u64.kib()),
            n => write!(f, "{} B", n),
        }
    }
}
