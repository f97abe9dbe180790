// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board constants for the Courier vehicle.

use courier_core::config::{DEFAULT_HEARTBEAT_MS, DEFAULT_OBSTACLE_THRESHOLD_CM};
use courier_core::ControllerConfig;

use crate::drivers::drivetrain::SteeringStyle;

/// APB1 timer clock with the reset clock tree (16 MHz HSI, no PLL).
pub const TIMER_CLOCK_HZ: u32 = 16_000_000;

/// TIM3 prescaler for the controller timebase.
pub const TICK_PRESCALER: u16 = 512;

/// Resulting timebase rate: 31.25 kHz, one overflow every 8.192 ms.
pub const TICK_HZ: u32 = TIMER_CLOCK_HZ / TICK_PRESCALER as u32;

/// TIM4 prescaler for the motor enable PWM (16 MHz / 4 / 256 = 15.6 kHz).
pub const PWM_PRESCALER: u16 = 4;

pub const DEBUG_BAUD: u32 = 115_200;
pub const REMOTE_BAUD: u32 = 9_600;

/// How long to wait for an echo before giving up on a reading.
pub const ECHO_TIMEOUT_US: u32 = 30_000;

#[cfg(not(feature = "spin-turns"))]
pub const STEERING: SteeringStyle = SteeringStyle::StopInner;
#[cfg(feature = "spin-turns")]
pub const STEERING: SteeringStyle = SteeringStyle::ReverseInner;

pub fn controller() -> ControllerConfig {
    ControllerConfig {
        tick_hz: TICK_HZ,
        heartbeat_ms: DEFAULT_HEARTBEAT_MS,
        obstacle_threshold_cm: DEFAULT_OBSTACLE_THRESHOLD_CM,
        ..ControllerConfig::default()
    }
}
