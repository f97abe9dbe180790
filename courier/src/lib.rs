// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Courier Firmware
//!
//! Board support for the Courier remote-controlled delivery vehicle, written in Rust, targeting an
//! STM32F767 MCU. The control logic itself lives in `courier-core`; this crate implements its
//! collaborator traits on real hardware.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | MCU-level wrappers around USART, timers, PWM, GPIO |
//! | [`drivers`] | Device-level drivers (drivetrain, HC-SR04, HD44780) |
//! | [`config`] | Board constants and controller tuning |
//! | [`logger`] | `log` backend on the debug USART |
//!
//! ## Getting Started
//!
//! Build docs:
//!
//! ```bash
//! cargo doc -p courier --no-deps --open --target thumbv7em-none-eabihf
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run -p courier --release --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![no_std]

pub mod config;
pub mod drivers;
pub mod hw;
pub mod logger;
