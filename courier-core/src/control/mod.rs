// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Vehicle Control
//!
//! Path recording and autonomous return.
//!
//! ## Modules
//!
//! - [`move_stack`] - Bounded LIFO of driven legs, each stored as the move that undoes it.
//! - [`dispatcher`] - Remote command handling on [`Controller`].
//! - [`watchdog`] - Heartbeat check that detects a lost remote link.
//! - [`replay`] - Unwinds the move stack leg by leg with exact timing.
//! - [`obstacle`] - Halts straight-line travel in front of obstacles without disturbing timing.
//! - [`controller`] - Owns the state above and routes interrupts and polls into it.

pub mod controller;
pub mod dispatcher;
pub mod move_stack;
pub mod obstacle;
pub mod replay;
pub mod watchdog;

pub use controller::{Controller, ControllerMode, ControllerState, Status};
pub use dispatcher::Effect;
pub use move_stack::{MoveRecord, MoveStack, MOVE_STACK_CAPACITY};
pub use obstacle::{GuardAction, ObstacleGuard, RangeReadings};
pub use replay::{ReplayEngine, ReplayState};
pub use watchdog::{Heartbeat, Watchdog};
