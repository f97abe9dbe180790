// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Drive modes and speed gears.

/// One of the five drivetrain modes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Motion {
    Forward,
    Backward,
    Stop,
    SteerLeft,
    SteerRight,
}

/// Direction of travel along the vehicle's long axis, used to pick the range sensor that matters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Forward,
    Backward,
}

impl Motion {
    /// The motion that undoes this one when driven for the same duration.
    #[inline]
    pub const fn inverse(self) -> Self {
        match self {
            Motion::Forward => Motion::Backward,
            Motion::Backward => Motion::Forward,
            Motion::Stop => Motion::Stop,
            Motion::SteerLeft => Motion::SteerRight,
            Motion::SteerRight => Motion::SteerLeft,
        }
    }

    /// Straight-line heading of this motion, if any. Steering and stopping have none.
    #[inline]
    pub const fn heading(self) -> Option<Heading> {
        match self {
            Motion::Forward => Some(Heading::Forward),
            Motion::Backward => Some(Heading::Backward),
            _ => None,
        }
    }
}

/// Discrete speed level in `[Gear::MIN, Gear::MAX]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Gear(u8);

impl Gear {
    pub const MIN: Gear = Gear(1);
    pub const MAX: Gear = Gear(5);

    /// PWM compare step per gear on an 8-bit period (5 * 51 = 255, full duty).
    const COMPARE_STEP: u8 = 51;

    /// Construct a gear, returning `None` outside `1..=5`.
    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::MIN.0 && level <= Self::MAX.0 {
            Some(Gear(level))
        } else {
            None
        }
    }

    #[inline]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Next gear up, or `None` when already at the top.
    pub fn up(self) -> Option<Self> {
        Gear::new(self.0 + 1)
    }

    /// Next gear down, or `None` when already at the bottom.
    pub fn down(self) -> Option<Self> {
        Gear::new(self.0.saturating_sub(1))
    }

    /// Compare value for an 8-bit PWM period (auto-reload 255).
    #[inline]
    pub const fn compare_value(self) -> u8 {
        self.0 * Self::COMPARE_STEP
    }
}

impl Default for Gear {
    fn default() -> Self {
        Gear::MIN
    }
}
