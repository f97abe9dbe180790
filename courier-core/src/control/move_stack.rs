// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bounded history of driven legs.

use heapless::Vec;

use crate::error::StackFull;
use crate::motion::{Gear, Motion};
use crate::timing::Elapsed;

/// Most legs remembered before new ones are dropped.
pub const MOVE_STACK_CAPACITY: usize = 300;

/// One leg of the outbound path, already expressed as the move that undoes it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    /// Mode to drive on the way back (the inverse of what was driven).
    pub motion: Motion,

    /// Gear the leg was driven in.
    pub gear: Gear,

    /// How long the leg lasted.
    pub elapsed: Elapsed,
}

/// Last-in-first-out store of [`MoveRecord`]s with a fixed capacity.
pub struct MoveStack<const N: usize = MOVE_STACK_CAPACITY> {
    records: Vec<MoveRecord, N>,
}

impl<const N: usize> MoveStack<N> {
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record. A full stack rejects it and stays unchanged.
    pub fn push(&mut self, record: MoveRecord) -> Result<(), StackFull> {
        self.records.push(record).map_err(StackFull)
    }

    /// Remove the most recent record.
    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.records.is_full()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Records from oldest to newest.
    pub fn as_slice(&self) -> &[MoveRecord] {
        &self.records
    }
}

impl<const N: usize> Default for MoveStack<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(motion: Motion, ticks: u32) -> MoveRecord {
        MoveRecord {
            motion,
            gear: Gear::MIN,
            elapsed: Elapsed::from_ticks(ticks),
        }
    }

    #[test]
    fn pops_in_reverse_order() {
        let mut stack: MoveStack = MoveStack::new();
        stack.push(leg(Motion::Backward, 2000)).unwrap();
        stack.push(leg(Motion::SteerRight, 500)).unwrap();

        assert_eq!(stack.pop(), Some(leg(Motion::SteerRight, 500)));
        assert_eq!(stack.pop(), Some(leg(Motion::Backward, 2000)));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn full_stack_rejects_without_corruption() {
        let mut stack: MoveStack = MoveStack::new();
        for i in 0..MOVE_STACK_CAPACITY as u32 {
            stack.push(leg(Motion::Forward, i)).unwrap();
        }
        assert!(stack.is_full());

        let extra = leg(Motion::SteerLeft, 42);
        assert_eq!(stack.push(extra), Err(StackFull(extra)));
        assert_eq!(stack.len(), MOVE_STACK_CAPACITY);
        assert_eq!(stack.as_slice()[0], leg(Motion::Forward, 0));
        assert_eq!(stack.pop(), Some(leg(Motion::Forward, MOVE_STACK_CAPACITY as u32 - 1)));
    }

    #[test]
    fn smaller_capacity() {
        let mut stack = MoveStack::<2>::new();
        assert_eq!(stack.capacity(), 2);
        stack.push(leg(Motion::Stop, 1)).unwrap();
        stack.push(leg(Motion::Stop, 2)).unwrap();
        assert!(stack.push(leg(Motion::Stop, 3)).is_err());
    }
}
