// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application logic.
//!
//! ## Existing drivers
//!
//! - [`drivetrain`] – Dual H-bridge differential drive, implements `MotionActuator`
//! - [`hc_sr04`] – HC-SR04 ultrasonic range sensor, implements `RangeSensor`
//! - [`lcd`] – HD44780 16x2 character display in 4-bit mode

pub mod drivetrain;
pub mod hc_sr04;
pub mod lcd;

pub use drivetrain::Drivetrain;
pub use hc_sr04::HcSr04;
pub use lcd::Lcd;
