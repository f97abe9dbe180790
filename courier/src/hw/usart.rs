// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! - [`Usart`] is the blocking TX side of the debug port, used by the logger.
//! - [`CommandRx`] is the interrupt-driven RX side of the remote link (Bluetooth module).
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```

use core::fmt;
use nb::block;

use cortex_m::peripheral::NVIC;
use courier_core::traits::CommandLink;
use stm32f7xx_hal::{
    pac,
    prelude::*,
    serial::{Instance, Pins, Rx, Serial, Tx},
};

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

/// Receive side of the remote link.
///
/// The serial port must have its RXNE interrupt enabled before splitting. Disabling the link masks
/// the interrupt line in the NVIC, so no further bytes reach the controller.
pub struct CommandRx<U: Instance> {
    rx: Rx<U>,
    irq: pac::Interrupt,
}

impl<U: Instance> CommandRx<U> {
    pub fn new(rx: Rx<U>, irq: pac::Interrupt) -> Self {
        Self { rx, irq }
    }

    /// Take the received byte, if any. Line errors are logged and the byte is lost.
    pub fn read(&mut self) -> Option<u8> {
        match self.rx.read() {
            Ok(byte) => Some(byte),
            Err(nb::Error::WouldBlock) => None,
            Err(nb::Error::Other(e)) => {
                log::warn!("remote link: {:?}", e);
                None
            }
        }
    }

    /// Start delivering bytes.
    pub fn enable(&mut self) {
        unsafe { NVIC::unmask(self.irq) };
    }
}

impl<U: Instance> CommandLink for CommandRx<U> {
    fn disable(&mut self) {
        NVIC::mask(self.irq);
    }
}
