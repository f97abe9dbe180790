// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Timebase abstraction and exact duration reconstruction.
//!
//! The hardware timebase is an 8-bit up-counter that raises an overflow interrupt every
//! [`PERIOD_TICKS`] ticks. Durations are kept as an overflow count plus a tick remainder, and
//! intervals are scheduled by preloading the counter so that a whole number of overflows lands
//! exactly on the requested tick.
//!
//! [`TickClock`] sits between the controller and the timebase. It banks the ticks of every completed
//! period, so the measured duration of a leg stays exact even when the counter is reloaded mid-leg
//! (the heartbeat window does this every few seconds) or frozen by the obstacle guard.

/// Ticks per counter period (8-bit counter).
pub const PERIOD_TICKS: u32 = 256;

/// Periodic hardware counter driving the controller.
///
/// Overflow events are delivered by the platform calling
/// [`Controller::service_overflow`](crate::control::Controller::service_overflow) from its
/// interrupt. The controller also drains a latched overflow itself before it reads or reloads the
/// counter from any other context.
pub trait Timebase {
    /// Current counter value within the running period.
    fn counter(&self) -> u8;

    /// Overwrite the counter. The next overflow fires after `256 - value` ticks.
    fn set_counter(&mut self, value: u8);

    /// Stop counting. No ticks elapse and no overflows fire until [`resume`](Self::resume).
    fn pause(&mut self);

    /// Restart counting from the current counter value.
    fn resume(&mut self);

    fn is_running(&self) -> bool;

    /// Acknowledge a latched overflow that has not been handled yet. Returns `true` if one was
    /// pending.
    fn take_overflow(&mut self) -> bool;
}

/// A duration in timebase units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Elapsed {
    pub overflows: u16,
    pub ticks: u8,
}

impl Elapsed {
    pub const ZERO: Elapsed = Elapsed {
        overflows: 0,
        ticks: 0,
    };

    /// Largest representable duration, in ticks.
    pub const MAX_TICKS: u32 = u16::MAX as u32 * PERIOD_TICKS + u8::MAX as u32;

    /// Split a tick count into overflows and remainder, saturating at [`Elapsed::MAX_TICKS`].
    pub fn from_ticks(total: u32) -> Self {
        let total = total.min(Self::MAX_TICKS);
        Self {
            overflows: (total / PERIOD_TICKS) as u16,
            ticks: (total % PERIOD_TICKS) as u8,
        }
    }

    #[inline]
    pub fn total_ticks(&self) -> u32 {
        self.overflows as u32 * PERIOD_TICKS + self.ticks as u32
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.overflows == 0 && self.ticks == 0
    }
}

/// How to wait out an interval: preload the counter, then count overflow events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    /// Overflow events to count after preloading. Zero means the interval is already over.
    pub overflows: u32,
    /// Counter value to load at the start of the interval.
    pub preload: u8,
}

impl Schedule {
    /// Schedule an interval of exactly `total` ticks.
    ///
    /// A fractional period is absorbed by the preload: the first overflow arrives early by
    /// `preload` ticks, every following one a full period later.
    pub fn from_ticks(total: u32) -> Self {
        let overflows = total.div_ceil(PERIOD_TICKS);
        let preload = (overflows as u64 * PERIOD_TICKS as u64 - total as u64) as u8;
        Self { overflows, preload }
    }

    /// Schedule a wall-clock interval on a timebase ticking at `tick_hz`, rounded to the nearest
    /// tick.
    pub fn from_millis(ms: u32, tick_hz: u32) -> Self {
        let ticks = (ms as u64 * tick_hz as u64 + 500) / 1000;
        Self::from_ticks(ticks.min(u32::MAX as u64) as u32)
    }

    #[inline]
    pub fn from_elapsed(elapsed: Elapsed) -> Self {
        Self::from_ticks(elapsed.total_ticks())
    }

    /// Total ticks covered by this schedule.
    #[inline]
    pub fn total_ticks(&self) -> u32 {
        (self.overflows as u64 * PERIOD_TICKS as u64 - self.preload as u64) as u32
    }
}

/// Tick-exact stopwatch over a [`Timebase`].
pub struct TickClock<T> {
    timebase: T,
    /// Ticks from completed (or reloaded) periods since the reference point.
    banked: u32,
    /// Counter value at which the current period started counting toward `banked`.
    period_start: u8,
}

impl<T: Timebase> TickClock<T> {
    /// Wrap a timebase, taking "now" as the reference point.
    pub fn new(timebase: T) -> Self {
        let period_start = timebase.counter();
        Self {
            timebase,
            banked: 0,
            period_start,
        }
    }

    /// Account for a counter overflow. Must be called exactly once per overflow, before anything
    /// reads or reloads the counter.
    pub fn on_overflow(&mut self) {
        let rest = PERIOD_TICKS - self.period_start as u32;
        self.banked = self.banked.saturating_add(rest);
        self.period_start = 0;
    }

    /// Reload the counter without losing the ticks already counted in this period.
    pub fn preload(&mut self, value: u8) {
        let counted = self.timebase.counter().saturating_sub(self.period_start);
        self.banked = self.banked.saturating_add(counted as u32);
        self.timebase.set_counter(value);
        self.period_start = value;
    }

    /// Ticks since the reference point.
    pub fn elapsed_ticks(&self) -> u32 {
        let counted = self.timebase.counter().saturating_sub(self.period_start);
        self.banked.saturating_add(counted as u32)
    }

    #[inline]
    pub fn elapsed(&self) -> Elapsed {
        Elapsed::from_ticks(self.elapsed_ticks())
    }

    /// Return the time since the reference point and move the reference point to now.
    pub fn lap(&mut self) -> Elapsed {
        let elapsed = self.elapsed();
        self.banked = 0;
        self.period_start = self.timebase.counter();
        elapsed
    }

    #[inline]
    pub fn pause(&mut self) {
        self.timebase.pause();
    }

    #[inline]
    pub fn resume(&mut self) {
        self.timebase.resume();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.timebase.is_running()
    }

    #[inline]
    pub fn take_overflow(&mut self) -> bool {
        self.timebase.take_overflow()
    }

    pub fn timebase(&self) -> &T {
        &self.timebase
    }

}
