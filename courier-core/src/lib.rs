// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Courier Core
//!
//! Hardware-independent control logic for the Courier remote-controlled delivery vehicle: command
//! dispatch, path recording, link-loss detection, autonomous return, and obstacle pausing.
//!
//! The firmware crate (`courier`) implements the collaborator traits on an STM32F767 and forwards
//! its interrupts into [`control::Controller`]. Everything here builds and tests on the host.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`motion`] | Drive modes, gears, and their inverses |
//! | [`timing`] | Timebase trait and exact tick reconstruction across overflows |
//! | [`protocol`] | One-byte remote command protocol and message framing |
//! | [`control`] | Move stack, dispatcher, watchdog, replay engine, obstacle guard |
//! | [`traits`] | Actuator, range sensor, and command link abstractions |
//! | [`mock`] | In-memory collaborators for host tests |
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p courier-core
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
pub mod control;
pub mod error;
pub mod mock;
pub mod motion;
pub mod protocol;
pub mod timing;
pub mod traits;

pub use config::ControllerConfig;
pub use control::{Controller, Status};
pub use error::{SensorError, StackFull};
pub use motion::{Gear, Heading, Motion};
