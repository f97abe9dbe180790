// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Obstacle halting for straight-line travel.
//!
//! Only the sensor facing the direction of travel matters: driving forward checks the front
//! sensor, driving backward the back one. Steering and standing still are never halted.

use crate::motion::Heading;
use crate::traits::RangeSensor;

/// One sample from each range sensor. `None` means the sensor gave no reading.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeReadings {
    pub front_cm: Option<u16>,
    pub back_cm: Option<u16>,
}

impl RangeReadings {
    /// Trigger both sensors, front first.
    pub fn sample<F: RangeSensor, B: RangeSensor>(front: &mut F, back: &mut B) -> Self {
        Self {
            front_cm: read(front, "front"),
            back_cm: read(back, "back"),
        }
    }

    fn facing(&self, heading: Heading) -> Option<u16> {
        match heading {
            Heading::Forward => self.front_cm,
            Heading::Backward => self.back_cm,
        }
    }
}

fn read<S: RangeSensor>(sensor: &mut S, name: &str) -> Option<u16> {
    match sensor.distance_cm() {
        Ok(cm) => Some(cm),
        Err(e) => {
            log::trace!("{name} sensor: {e}");
            None
        }
    }
}

/// What the controller should do after a poll.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuardAction {
    Idle,
    /// Stop the drivetrain and freeze the timebase.
    Halt,
    /// Drive the current motion again and restart the timebase.
    Resume,
}

pub struct ObstacleGuard {
    threshold_cm: u16,
    front_blocked: bool,
    back_blocked: bool,
}

impl ObstacleGuard {
    pub const fn new(threshold_cm: u16) -> Self {
        Self {
            threshold_cm,
            front_blocked: false,
            back_blocked: false,
        }
    }

    #[inline]
    pub fn front_blocked(&self) -> bool {
        self.front_blocked
    }

    #[inline]
    pub fn back_blocked(&self) -> bool {
        self.back_blocked
    }

    /// `true` while the vehicle is held for an obstacle.
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.front_blocked || self.back_blocked
    }

    /// `true` if travelling with `heading` would run into the side currently blocked.
    pub fn blocks(&self, heading: Option<Heading>) -> bool {
        match heading {
            Some(Heading::Forward) => self.front_blocked,
            Some(Heading::Backward) => self.back_blocked,
            None => false,
        }
    }

    /// Forget any block without resuming anything.
    pub fn clear(&mut self) {
        self.front_blocked = false;
        self.back_blocked = false;
    }

    /// Update the blocked flags from fresh readings while travelling with `heading`.
    ///
    /// A block clears when the distance recovers to the threshold or when the vehicle is no longer
    /// heading that way. A missing reading leaves the flag for that side as it was.
    pub fn poll(&mut self, heading: Option<Heading>, readings: RangeReadings) -> GuardAction {
        let was_halted = self.is_halted();

        for side in [Heading::Forward, Heading::Backward] {
            let travelling = heading == Some(side);
            let reading = readings.facing(side);
            let close = reading.map(|cm| cm < self.threshold_cm);
            let threshold_cm = self.threshold_cm;
            let blocked = self.flag(side);

            if *blocked {
                if !travelling || close == Some(false) {
                    *blocked = false;
                    log::debug!("{side:?} clear ({reading:?} cm)");
                }
            } else if travelling && close == Some(true) {
                *blocked = true;
                log::debug!("{side:?} blocked at {reading:?} cm (< {threshold_cm})");
            }
        }

        match (was_halted, self.is_halted()) {
            (false, true) => GuardAction::Halt,
            (true, false) => GuardAction::Resume,
            _ => GuardAction::Idle,
        }
    }

    fn flag(&mut self, side: Heading) -> &mut bool {
        match side {
            Heading::Forward => &mut self.front_blocked,
            Heading::Backward => &mut self.back_blocked,
        }
    }
}
