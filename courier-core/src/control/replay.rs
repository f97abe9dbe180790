// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Autonomous return along the recorded path.
//!
//! The engine pops one [`MoveRecord`] at a time and keeps it loaded for exactly its recorded
//! duration, counted in timebase overflows after a preload. It never touches the drivetrain
//! itself; the controller drives whatever leg [`ReplayEngine::advance`] hands back.

use crate::control::move_stack::{MoveRecord, MoveStack};
use crate::timing::{Schedule, TickClock, Timebase};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReplayState {
    Unwinding,
    Finished,
}

pub struct ReplayEngine {
    state: ReplayState,
    count: u32,
    required: u32,
}

impl ReplayEngine {
    pub const fn new() -> Self {
        Self {
            state: ReplayState::Unwinding,
            count: 0,
            required: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> ReplayState {
        self.state
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == ReplayState::Finished
    }

    /// Count one timebase overflow. Returns `true` once the loaded leg has run its full duration.
    pub fn tick(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.count += 1;
        self.count >= self.required
    }

    /// Load the next leg and start timing it.
    ///
    /// Legs with no duration are skipped. Returns `None` and finishes once the stack is empty.
    pub fn advance<T: Timebase, const N: usize>(
        &mut self,
        stack: &mut MoveStack<N>,
        clock: &mut TickClock<T>,
    ) -> Option<MoveRecord> {
        while let Some(record) = stack.pop() {
            let schedule = Schedule::from_elapsed(record.elapsed);
            if schedule.overflows == 0 {
                continue;
            }

            self.count = 0;
            self.required = schedule.overflows;
            clock.preload(schedule.preload);
            return Some(record);
        }

        self.state = ReplayState::Finished;
        None
    }
}

impl Default for ReplayEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Gear, Motion};
    use crate::mock::MockTimebase;
    use crate::timing::Elapsed;

    fn leg(motion: Motion, ticks: u32) -> MoveRecord {
        MoveRecord {
            motion,
            gear: Gear::MIN,
            elapsed: Elapsed::from_ticks(ticks),
        }
    }

    #[test]
    fn each_leg_lasts_its_recorded_duration() {
        let tb = MockTimebase::new();
        let mut clock = TickClock::new(&tb);
        let mut stack: MoveStack = MoveStack::new();
        stack.push(leg(Motion::Backward, 2000)).unwrap();
        stack.push(leg(Motion::SteerRight, 500)).unwrap();

        let mut engine = ReplayEngine::new();
        let mut legs: heapless::Vec<(Motion, u64), 4> = heapless::Vec::new();

        let first = engine.advance(&mut stack, &mut clock).unwrap();
        legs.push((first.motion, tb.now())).unwrap();

        tb.run(10_000, || {
            clock.on_overflow();
            if engine.tick() {
                let m = engine.advance(&mut stack, &mut clock).map_or(Motion::Stop, |r| r.motion);
                legs.push((m, tb.now())).unwrap();
            }
        });

        assert_eq!(
            legs.as_slice(),
            &[
                (Motion::SteerRight, 0),
                (Motion::Backward, 500),
                (Motion::Stop, 2500)
            ]
        );
        assert!(engine.is_finished());
    }

    #[test]
    fn zero_length_legs_are_skipped() {
        let tb = MockTimebase::new();
        let mut clock = TickClock::new(&tb);
        let mut stack: MoveStack = MoveStack::new();
        stack.push(leg(Motion::Forward, 300)).unwrap();
        stack.push(leg(Motion::SteerLeft, 0)).unwrap();

        let mut engine = ReplayEngine::new();
        assert_eq!(engine.advance(&mut stack, &mut clock), Some(leg(Motion::Forward, 300)));
        assert!(stack.is_empty());
    }

    #[test]
    fn empty_stack_finishes_at_once() {
        let tb = MockTimebase::new();
        let mut clock = TickClock::new(&tb);
        let mut stack: MoveStack = MoveStack::new();

        let mut engine = ReplayEngine::new();
        assert_eq!(engine.advance(&mut stack, &mut clock), None);
        assert_eq!(engine.state(), ReplayState::Finished);
        assert!(!engine.tick());
    }
}
