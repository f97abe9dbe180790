// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! In-memory collaborators for host tests.
//!
//! All mocks use interior mutability and implement the collaborator traits for `&Mock`, so a test
//! can hand a reference to the controller and keep inspecting (or driving) the same instance.
//!
//! ```
//! use courier_core::mock::MockTimebase;
//!
//! let tb = MockTimebase::new();
//! let mut overflows = 0;
//! tb.run(600, || overflows += 1);
//! assert_eq!(overflows, 2);
//! assert_eq!(tb.now(), 600);
//! ```

use core::cell::{Cell, RefCell};

use heapless::Vec;

use crate::error::SensorError;
use crate::motion::{Gear, Motion};
use crate::timing::{Timebase, PERIOD_TICKS};
use crate::traits::{CommandLink, MotionActuator, RangeSensor};

/// Simulated 8-bit timebase with a running tick total.
#[derive(Default)]
pub struct MockTimebase {
    counter: Cell<u8>,
    paused: Cell<bool>,
    /// Overflow latched by [`run_masked`](Self::run_masked) and not yet taken.
    pending: Cell<bool>,
    /// Ticks elapsed while running, never reloaded.
    now: Cell<u64>,
}

impl MockTimebase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total ticks counted since creation.
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn counter_value(&self) -> u8 {
        self.counter.get()
    }

    /// Whether an overflow is latched and waiting for its interrupt.
    pub fn overflow_pending(&self) -> bool {
        self.pending.get()
    }

    /// Let `ticks` ticks elapse, calling `on_overflow` at every counter wrap.
    ///
    /// The counter is re-read after each callback, so reloads from inside the callback take
    /// effect immediately. Nothing happens while paused, and a callback that pauses the timebase
    /// swallows the rest of the run.
    pub fn run(&self, mut ticks: u64, mut on_overflow: impl FnMut()) {
        while ticks > 0 && !self.paused.get() {
            let to_wrap = (PERIOD_TICKS - self.counter.get() as u32) as u64;
            if ticks < to_wrap {
                self.counter.set(self.counter.get() + ticks as u8);
                self.now.set(self.now.get() + ticks);
                return;
            }
            ticks -= to_wrap;
            self.counter.set(0);
            self.now.set(self.now.get() + to_wrap);
            on_overflow();
        }
    }

    /// Let `ticks` ticks elapse with the overflow interrupt held off. Wraps only latch the
    /// pending flag, which stays set until taken through [`Timebase::take_overflow`].
    pub fn run_masked(&self, mut ticks: u64) {
        while ticks > 0 && !self.paused.get() {
            let to_wrap = (PERIOD_TICKS - self.counter.get() as u32) as u64;
            if ticks < to_wrap {
                self.counter.set(self.counter.get() + ticks as u8);
                self.now.set(self.now.get() + ticks);
                return;
            }
            ticks -= to_wrap;
            self.counter.set(0);
            self.now.set(self.now.get() + to_wrap);
            self.pending.set(true);
        }
    }
}

impl Timebase for &MockTimebase {
    fn counter(&self) -> u8 {
        self.counter.get()
    }

    fn set_counter(&mut self, value: u8) {
        self.counter.set(value);
    }

    fn pause(&mut self) {
        self.paused.set(true);
    }

    fn resume(&mut self) {
        self.paused.set(false);
    }

    fn is_running(&self) -> bool {
        !self.paused.get()
    }

    fn take_overflow(&mut self) -> bool {
        self.pending.replace(false)
    }
}

/// One call to [`MotionActuator::drive`], stamped with the timebase tick total.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Drive {
    pub motion: Motion,
    pub gear: Gear,
    pub at: u64,
}

/// Maximum drive history kept by [`MockActuator`].
pub const DRIVE_LOG_CAPACITY: usize = 1024;

/// Records every drive command.
pub struct MockActuator<'a> {
    clock: Option<&'a MockTimebase>,
    gear: Cell<Gear>,
    log: RefCell<Vec<Drive, DRIVE_LOG_CAPACITY>>,
}

impl<'a> MockActuator<'a> {
    pub fn new() -> Self {
        Self {
            clock: None,
            gear: Cell::new(Gear::MIN),
            log: RefCell::new(Vec::new()),
        }
    }

    /// Stamp drive commands with `clock`'s tick total.
    pub fn with_clock(clock: &'a MockTimebase) -> Self {
        Self {
            clock: Some(clock),
            ..Self::new()
        }
    }

    /// Most recently applied motion, or `Stop` if nothing was driven yet.
    pub fn current(&self) -> Motion {
        self.log.borrow().last().map_or(Motion::Stop, |d| d.motion)
    }

    pub fn gear(&self) -> Gear {
        self.gear.get()
    }

    pub fn history(&self) -> Vec<Drive, DRIVE_LOG_CAPACITY> {
        self.log.borrow().clone()
    }

    pub fn clear_history(&self) {
        self.log.borrow_mut().clear();
    }
}

impl Default for MockActuator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionActuator for &MockActuator<'_> {
    fn drive(&mut self, motion: Motion) {
        let at = self.clock.map_or(0, |c| c.now());
        let entry = Drive {
            motion,
            gear: self.gear.get(),
            at,
        };
        // A full log only loses history, not behavior.
        let _ = self.log.borrow_mut().push(entry);
    }

    fn set_gear(&mut self, gear: Gear) {
        self.gear.set(gear);
    }
}

/// Remote link that only tracks whether it is still enabled.
pub struct MockLink {
    enabled: Cell<bool>,
}

impl MockLink {
    pub fn new() -> Self {
        Self {
            enabled: Cell::new(true),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

impl Default for MockLink {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLink for &MockLink {
    fn disable(&mut self) {
        self.enabled.set(false);
    }
}

/// Range sensor returning a settable distance. `None` simulates an echo timeout.
pub struct MockRange {
    distance: Cell<Option<u16>>,
}

impl MockRange {
    pub fn new(distance_cm: u16) -> Self {
        Self {
            distance: Cell::new(Some(distance_cm)),
        }
    }

    pub fn set(&self, distance_cm: Option<u16>) {
        self.distance.set(distance_cm);
    }
}

impl RangeSensor for &MockRange {
    fn distance_cm(&mut self) -> Result<u16, SensorError> {
        self.distance.get().ok_or(SensorError::EchoTimeout)
    }
}
