// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Remote link heartbeat.
//!
//! The watchdog splits time into fixed windows (5 s by default). Every window must see at least
//! one accepted remote byte; a window that passes in silence means the link is gone.

use crate::timing::{Schedule, TickClock, Timebase};

/// Outcome of one overflow as seen by the watchdog.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heartbeat {
    /// Still inside the current window.
    Pending,
    /// A window closed with traffic in it; the next one has started.
    Renewed,
    /// A window closed without any traffic.
    Lost,
}

pub struct Watchdog {
    window: Schedule,
    count: u32,
    alive: bool,
    exempt_parked: bool,
}

impl Watchdog {
    /// `exempt_parked` lets a parked vehicle keep the link alive without traffic.
    pub fn new(window: Schedule, exempt_parked: bool) -> Self {
        Self {
            window,
            count: 0,
            alive: true,
            exempt_parked,
        }
    }

    /// Start the first window now.
    pub fn arm<T: Timebase>(&mut self, clock: &mut TickClock<T>) {
        self.count = 0;
        clock.preload(self.window.preload);
    }

    /// Note traffic on the link for the current window.
    #[inline]
    pub fn feed(&mut self) {
        self.alive = true;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn window(&self) -> Schedule {
        self.window
    }

    /// Account for one timebase overflow.
    ///
    /// `parked` reports whether the last remote command left the vehicle standing.
    pub fn tick<T: Timebase>(&mut self, clock: &mut TickClock<T>, parked: bool) -> Heartbeat {
        self.count += 1;
        if self.count < self.window.overflows {
            return Heartbeat::Pending;
        }

        self.count = 0;
        clock.preload(self.window.preload);

        if !self.alive {
            return Heartbeat::Lost;
        }
        if !(self.exempt_parked && parked) {
            self.alive = false;
        }
        Heartbeat::Renewed
    }
}
