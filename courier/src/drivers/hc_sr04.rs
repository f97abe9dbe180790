// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HC-SR04 ultrasonic range sensor.
//!
//! A 10 µs trigger pulse starts a measurement; the sensor answers with an echo pulse whose width
//! is the round-trip time of flight. At roughly 343 m/s that is 58 µs per centimeter of distance.

use courier_core::traits::RangeSensor;
use courier_core::SensorError;

use crate::hw::micros::Micros;
use crate::hw::pins::SonarPins;

const TRIGGER_US: u32 = 10;
const US_PER_CM: u32 = 58;

pub struct HcSr04<'a, const TP: char, const TN: u8, const EP: char, const EN: u8> {
    pins: SonarPins<TP, TN, EP, EN>,
    micros: &'a Micros,
    /// Core clock cycles spanning the trigger pulse.
    trigger_cycles: u32,
    timeout_us: u32,
}

impl<'a, const TP: char, const TN: u8, const EP: char, const EN: u8> HcSr04<'a, TP, TN, EP, EN> {
    pub fn new(
        mut pins: SonarPins<TP, TN, EP, EN>,
        micros: &'a Micros,
        sysclk_hz: u32,
        timeout_us: u32,
    ) -> Self {
        pins.trig.set_low();
        Self {
            pins,
            micros,
            trigger_cycles: sysclk_hz / 1_000_000 * TRIGGER_US,
            timeout_us,
        }
    }

    /// Wait for the echo line to reach `high`, starting from `since`.
    fn wait_echo(&self, high: bool, since: u32) -> Result<u32, SensorError> {
        while self.pins.echo.is_high() != high {
            if self.micros.since(since) > self.timeout_us {
                return Err(SensorError::EchoTimeout);
            }
        }
        Ok(self.micros.now())
    }
}

impl<const TP: char, const TN: u8, const EP: char, const EN: u8> RangeSensor
    for HcSr04<'_, TP, TN, EP, EN>
{
    fn distance_cm(&mut self) -> Result<u16, SensorError> {
        self.pins.trig.set_high();
        cortex_m::asm::delay(self.trigger_cycles);
        self.pins.trig.set_low();

        let triggered = self.micros.now();
        let rise = self.wait_echo(true, triggered)?;
        let fall = self.wait_echo(false, rise)?;

        let width = fall.wrapping_sub(rise);
        Ok((width / US_PER_CM).min(u16::MAX as u32) as u16)
    }
}
