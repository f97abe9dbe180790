// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Active buzzer on a GPIO output.

use stm32f7xx_hal::gpio::{self, Output, PushPull};

/// Whether the buzzer sounds with its pin driven high or low.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

/// Buzzer that remembers its active level.
pub struct Buzzer<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
    active: ActiveLevel,
}

impl<const P: char, const N: u8> Buzzer<P, N> {
    /// Create a buzzer wrapper, initially silent.
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>, active: ActiveLevel) -> Self {
        let mut buzzer = Self {
            pin: pin.into_push_pull_output(),
            active,
        };
        buzzer.set(false);
        buzzer
    }

    pub fn active_high<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    /// Sound (true) or silence (false) the buzzer.
    pub fn set(&mut self, on: bool) {
        match (self.active, on) {
            (ActiveLevel::High, true) | (ActiveLevel::Low, false) => self.pin.set_high(),
            (ActiveLevel::High, false) | (ActiveLevel::Low, true) => self.pin.set_low(),
        }
    }
}
