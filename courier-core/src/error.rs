// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error types shared by the control path.

use core::fmt;

use crate::control::MoveRecord;

/// Returned by [`MoveStack::push`](crate::control::MoveStack::push) when the stack is at capacity.
///
/// Carries the rejected record so the caller can log what was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFull(pub MoveRecord);

impl fmt::Display for StackFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move stack full, dropped {:?}", self.0.motion)
    }
}

/// Range sensor failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The echo line never rose (or never fell) within the timeout.
    EchoTimeout,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::EchoTimeout => f.write_str("echo timeout"),
        }
    }
}
