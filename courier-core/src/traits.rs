// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Collaborator traits implemented by the firmware (and by [`crate::mock`] for host tests).
//!
//! The timebase trait lives in [`crate::timing`] next to the clock that consumes it.

use crate::error::SensorError;
use crate::motion::{Gear, Motion};

/// Drivetrain output.
pub trait MotionActuator {
    /// Apply a drive mode to both sides of the drivetrain.
    fn drive(&mut self, motion: Motion);

    /// Apply a speed level. Takes effect immediately for the motion already being driven.
    fn set_gear(&mut self, gear: Gear);
}

/// One-shot distance measurement.
pub trait RangeSensor {
    /// Trigger a measurement and block until the echo returns or times out.
    fn distance_cm(&mut self) -> Result<u16, SensorError>;
}

/// Remote command receiver.
///
/// Byte framing (single commands versus display messages) is handled by
/// [`protocol::Parser`](crate::protocol::Parser); the link itself only needs to be shut off once
/// the vehicle starts returning on its own.
pub trait CommandLink {
    /// Stop delivering remote bytes until the next restart.
    fn disable(&mut self);
}
