// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use spin::Mutex;

const UART_DATA_REG_OFFSET: usize = 0;
const UART_INT_ENABLE_REG_OFFSET: usize = 1;
const UART_INT_ID_FIFO_CTRL_REG_OFFSET: usize = 2;
const UART_LINE_CTRL_REG_OFFSET: usize = 3;
const UART_MODEM_CTRL_REG_OFFSET: usize = 4;
const UART_LINE_STATUS_REG_OFFSET: usize = 5;

/// MMIO base of the first 16550 on the QEMU `virt` board
pub const VIRT_UART0_BASE: usize = 0x1000_0000;

lazy_static::lazy_static! {
    pub static ref UART0: Mutex<Uart16550> = Mutex::new(unsafe {
        let mut uart = Uart16550::new(VIRT_UART0_BASE as *mut u8);
        uart.init();
        uart
    });
}

pub struct Uart16550 {
    base: *mut u8,
}

unsafe impl Send for Uart16550 {}

impl Uart16550 {
    /// # Safety
    ///
    /// `base` must point to the register block of a 16550 compatible UART
    /// that nothing else is driving.
    pub const unsafe fn new(base: *mut u8) -> Uart16550 {
        Self { base }
    }

    /// # Safety
    ///
    /// Same requirements as [`Uart16550::new`].
    #[rustfmt::skip]
    pub unsafe fn init(&mut self) {
        // Disable interrupts
        self.base.add(UART_INT_ENABLE_REG_OFFSET).write_volatile(0x00);
        // Enable DLAB
        self.base.add(UART_LINE_CTRL_REG_OFFSET).write_volatile(0x80);
        // 38400 baud
        self.base.add(UART_DATA_REG_OFFSET).write_volatile(0x03);
        self.base.add(UART_INT_ENABLE_REG_OFFSET).write_volatile(0x00);
        // 8 bits, no parity, one stop bit
        self.base.add(UART_LINE_CTRL_REG_OFFSET).write_volatile(0x03);
        // Enable FIFO, clear, with 14-byte threshold
        self.base.add(UART_INT_ID_FIFO_CTRL_REG_OFFSET).write_volatile(0xC7);
        // RTS/DSR set
        self.base.add(UART_MODEM_CTRL_REG_OFFSET).write_volatile(0x03);
    }

    fn line_status(&self) -> u8 {
        unsafe { self.base.add(UART_LINE_STATUS_REG_OFFSET).read_volatile() }
    }

    fn transmit_empty(&self) -> bool {
        self.line_status() & (1 << 5) == (1 << 5)
    }

    pub fn write(&mut self, data: u8) {
        while !self.transmit_empty() {}

        unsafe { self.base.add(UART_DATA_REG_OFFSET).write_volatile(data) }
    }
}

impl core::fmt::Write for Uart16550 {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for byte in s.bytes() {
            self.write(byte);
        }

        Ok(())
    }
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::console::uart::_print(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}

#[doc(hidden)]
pub fn _print(args: core::fmt::Arguments) {
    use core::fmt::Write;
    // Writing to the UART can't fail, and there's nowhere to report it anyway
    let _ = UART0.lock().write_fmt(args);
}
