// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `log` backend on the debug USART.
//!
//! Each record is written as one CRLF-terminated line inside a critical section, so lines from the
//! main loop and from interrupt handlers never interleave.

use core::cell::RefCell;
use core::fmt::Write;

use cortex_m::interrupt::{self, Mutex};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use stm32f7xx_hal::pac;

use crate::hw::usart::Usart;

static PORT: Mutex<RefCell<Option<Usart<pac::USART3>>>> = Mutex::new(RefCell::new(None));
static LOGGER: UsartLogger = UsartLogger;

struct UsartLogger;

impl Log for UsartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        interrupt::free(|cs| {
            if let Some(port) = PORT.borrow(cs).borrow_mut().as_mut() {
                let _ = write!(port, "[{:<5}] {}\r\n", record.level(), record.args());
            }
        });
    }

    fn flush(&self) {
        interrupt::free(|cs| {
            if let Some(port) = PORT.borrow(cs).borrow_mut().as_mut() {
                port.flush();
            }
        });
    }
}

/// Route `log` output to `port` at `level` and above.
pub fn init(port: Usart<pac::USART3>, level: LevelFilter) -> Result<(), SetLoggerError> {
    interrupt::free(|cs| PORT.borrow(cs).replace(Some(port)));
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
