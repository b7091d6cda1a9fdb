// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

#[macro_use]
pub mod uart;

use crate::dump::DumpSink;

/// Installs [`ConsoleLogger`] as the global logger. Does nothing if some
/// other logger got there first.
pub fn init_logger() {
    if log::set_logger(&ConsoleLogger).is_err() {
        return;
    }

    #[cfg(debug_assertions)]
    log::set_max_level(log::LevelFilter::Trace);
    #[cfg(not(debug_assertions))]
    log::set_max_level(log::LevelFilter::Info);
}

pub struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    #[allow(unused_variables)]
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        #[cfg(debug_assertions)]
        return true;

        #[cfg(not(debug_assertions))]
        return metadata.level() <= log::Level::Info;
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mod_path = record.module_path_static().or_else(|| record.module_path()).unwrap_or("<n/a>");

        #[cfg(debug_assertions)]
        {
            let file = record.file_static().or_else(|| record.file()).unwrap_or("<n/a>");

            println!("[ {:>5} ] [{} {}:{}] {}", record.level(), mod_path, file, record.line().unwrap_or(0), record.args());
        }

        #[cfg(not(debug_assertions))]
        println!("[ {:>5} ] [{}] {}", record.level(), mod_path, record.args());
    }

    fn flush(&self) {}
}

/// Writes dump lines straight to the UART, bypassing the logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl DumpSink for Console {
    fn write_line(&mut self, line: core::fmt::Arguments<'_>) {
        println!("{}", line);
    }
}
