// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HD44780 character display, 16x2, 4-bit interface, write-only (R/W tied low).

use core::fmt;

use cortex_m::delay::Delay;
use stm32f7xx_hal::gpio::{self, Output, PushPull};

use crate::hw::pins::LcdPins;

pub const COLS: u8 = 16;
pub const ROWS: u8 = 2;

// Instructions
const CLEAR: u8 = 0x01;
const RETURN_HOME: u8 = 0x02;
const ENTRY_MODE_INCREMENT: u8 = 0x06;
const DISPLAY_ON_CURSOR_OFF: u8 = 0x0C;
const FUNCTION_4BIT_2LINE: u8 = 0x28;
const SET_DDRAM_ADDR: u8 = 0x80;

/// DDRAM address of the first column of each row.
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40];

pub struct Lcd {
    pins: LcdPins,
    delay: Delay,
    row: u8,
    col: u8,
}

impl Lcd {
    /// Run the 4-bit initialization sequence and clear the display.
    pub fn new(pins: LcdPins, delay: Delay) -> Self {
        let mut lcd = Self {
            pins,
            delay,
            row: 0,
            col: 0,
        };

        lcd.pins.rs.set_low();
        lcd.pins.en.set_low();
        lcd.delay.delay_ms(50);

        // Three 8-bit function sets, then switch to 4-bit.
        for _ in 0..3 {
            lcd.write_nibble(0x3);
            lcd.delay.delay_us(4_500);
        }
        lcd.write_nibble(0x2);
        lcd.delay.delay_us(150);

        lcd.command(FUNCTION_4BIT_2LINE);
        lcd.command(DISPLAY_ON_CURSOR_OFF);
        lcd.command(ENTRY_MODE_INCREMENT);
        lcd.clear();
        lcd
    }

    pub fn clear(&mut self) {
        self.command(CLEAR);
        self.delay.delay_us(2_000);
        self.row = 0;
        self.col = 0;
    }

    pub fn home(&mut self) {
        self.command(RETURN_HOME);
        self.delay.delay_us(2_000);
        self.row = 0;
        self.col = 0;
    }

    /// Move the cursor. Out-of-range positions are clamped.
    pub fn set_cursor(&mut self, row: u8, col: u8) {
        self.row = row.min(ROWS - 1);
        self.col = col.min(COLS - 1);
        self.command(SET_DDRAM_ADDR | (ROW_OFFSETS[self.row as usize] + self.col));
    }

    /// Print one character, wrapping to the next row at the end of a line.
    pub fn write_byte(&mut self, b: u8) {
        if self.col >= COLS {
            let next = (self.row + 1) % ROWS;
            self.set_cursor(next, 0);
        }
        self.data(b);
        self.col += 1;
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    fn command(&mut self, cmd: u8) {
        self.pins.rs.set_low();
        self.write_byte_raw(cmd);
    }

    fn data(&mut self, b: u8) {
        self.pins.rs.set_high();
        self.write_byte_raw(b);
    }

    fn write_byte_raw(&mut self, b: u8) {
        self.write_nibble(b >> 4);
        self.write_nibble(b & 0x0F);
        self.delay.delay_us(40);
    }

    fn write_nibble(&mut self, nibble: u8) {
        let p = &mut self.pins;
        set(&mut p.d4, nibble & 0b0001 != 0);
        set(&mut p.d5, nibble & 0b0010 != 0);
        set(&mut p.d6, nibble & 0b0100 != 0);
        set(&mut p.d7, nibble & 0b1000 != 0);

        self.pins.en.set_high();
        self.delay.delay_us(1);
        self.pins.en.set_low();
        self.delay.delay_us(1);
    }
}

fn set<const P: char, const N: u8>(pin: &mut gpio::Pin<P, N, Output<PushPull>>, high: bool) {
    if high {
        pin.set_high();
    } else {
        pin.set_low();
    }
}

impl fmt::Write for Lcd {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}
