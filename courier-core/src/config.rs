// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Controller tuning.

/// Tick rate of the reference timebase: 8 MHz core clock divided by a 256 prescaler.
pub const DEFAULT_TICK_HZ: u32 = 31_250;

/// Length of one link heartbeat window.
pub const DEFAULT_HEARTBEAT_MS: u32 = 5_000;

/// Obstacles closer than this halt the vehicle.
pub const DEFAULT_OBSTACLE_THRESHOLD_CM: u16 = 10;

/// Static configuration for [`Controller`](crate::control::Controller).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Timebase ticks per second.
    pub tick_hz: u32,

    /// Heartbeat window. Every window must see at least one accepted remote byte.
    pub heartbeat_ms: u32,

    /// Halting distance for the obstacle guard.
    pub obstacle_threshold_cm: u16,

    /// Also record legs spent standing still, so the return trip waits out every stop.
    pub record_stops: bool,

    /// Treat a window as alive without fresh traffic while the most recent command was STOP or a
    /// display message (or nothing has been received since boot).
    pub exempt_parked: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
            heartbeat_ms: DEFAULT_HEARTBEAT_MS,
            obstacle_threshold_cm: DEFAULT_OBSTACLE_THRESHOLD_CM,
            record_stops: false,
            exempt_parked: false,
        }
    }
}
