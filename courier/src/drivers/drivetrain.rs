// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-sided differential drivetrain on an L298N-style dual H-bridge.
//!
//! Each side has two direction inputs (IN1/IN2); speed comes from the shared enable PWM in
//! [`GearPwm`].

use courier_core::traits::MotionActuator;
use courier_core::{Gear, Motion};

use crate::hw::pins::DrivePins;
use crate::hw::pwm::GearPwm;

/// Drive direction for one side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Direction {
    Forward,
    Reverse,
    Coast,
}

/// How the inner side behaves while steering.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SteeringStyle {
    /// Inner side stops; the vehicle pivots around it.
    StopInner,
    /// Inner side reverses; the vehicle spins in place.
    ReverseInner,
}

pub struct Drivetrain {
    pins: DrivePins,
    pwm: GearPwm,
    steering: SteeringStyle,
}

impl Drivetrain {
    /// Construct the drivetrain, coasting.
    pub fn new(pins: DrivePins, pwm: GearPwm, steering: SteeringStyle) -> Self {
        let mut drivetrain = Self {
            pins,
            pwm,
            steering,
        };
        drivetrain.set_sides(Direction::Coast, Direction::Coast);
        drivetrain
    }

    fn set_sides(&mut self, left: Direction, right: Direction) {
        let p = &mut self.pins;
        match left {
            Direction::Forward => {
                p.left_in1.set_high();
                p.left_in2.set_low();
            }
            Direction::Reverse => {
                p.left_in1.set_low();
                p.left_in2.set_high();
            }
            Direction::Coast => {
                p.left_in1.set_low();
                p.left_in2.set_low();
            }
        }
        match right {
            Direction::Forward => {
                p.right_in1.set_high();
                p.right_in2.set_low();
            }
            Direction::Reverse => {
                p.right_in1.set_low();
                p.right_in2.set_high();
            }
            Direction::Coast => {
                p.right_in1.set_low();
                p.right_in2.set_low();
            }
        }
    }

    fn inner(&self) -> Direction {
        match self.steering {
            SteeringStyle::StopInner => Direction::Coast,
            SteeringStyle::ReverseInner => Direction::Reverse,
        }
    }
}

impl MotionActuator for Drivetrain {
    fn drive(&mut self, motion: Motion) {
        let (left, right) = match motion {
            Motion::Forward => (Direction::Forward, Direction::Forward),
            Motion::Backward => (Direction::Reverse, Direction::Reverse),
            Motion::Stop => (Direction::Coast, Direction::Coast),
            Motion::SteerRight => (Direction::Forward, self.inner()),
            Motion::SteerLeft => (self.inner(), Direction::Forward),
        };
        self.set_sides(left, right);
    }

    fn set_gear(&mut self, gear: Gear) {
        self.pwm.set_gear(gear);
    }
}
