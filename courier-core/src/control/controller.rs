// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Top-level vehicle controller.
//!
//! [`Controller`] owns every piece of mutable control state and is driven from three places:
//!
//! - the remote link interrupt calls [`Controller::on_byte`] for every received byte,
//! - the timebase overflow interrupt calls [`Controller::service_overflow`],
//! - the main loop samples the range sensors and calls [`Controller::poll_obstacles`].
//!
//! On the firmware all three run with the controller borrowed from a critical section, so the
//! methods never observe each other half-way. The counter keeps running inside the critical
//! section, though, so it can wrap while its interrupt is held off. `on_byte` and
//! `poll_obstacles` therefore handle such a latched overflow first, and the late interrupt then
//! finds nothing left to do.

use crate::config::ControllerConfig;
use crate::control::move_stack::{MoveRecord, MoveStack};
use crate::control::obstacle::{GuardAction, ObstacleGuard, RangeReadings};
use crate::control::replay::ReplayEngine;
use crate::control::watchdog::{Heartbeat, Watchdog};
use crate::motion::{Gear, Motion};
use crate::protocol::{Command, Parser};
use crate::timing::{Schedule, TickClock, Timebase};
use crate::traits::{CommandLink, MotionActuator};

/// Who is in charge of the vehicle.
pub enum ControllerMode {
    /// Driven by the remote; the watchdog checks the link on every overflow.
    Remote(Watchdog),
    /// Retracing the recorded path; remote input is off until restart.
    Replaying(ReplayEngine),
}

/// Result of one overflow, for the controller to act on.
enum Tick {
    Idle,
    LinkLost,
    Leg(MoveRecord),
    Finished,
}

impl ControllerMode {
    fn tick<T: Timebase, const N: usize>(
        &mut self,
        stack: &mut MoveStack<N>,
        clock: &mut TickClock<T>,
        parked: bool,
    ) -> Tick {
        match self {
            ControllerMode::Remote(watchdog) => match watchdog.tick(clock, parked) {
                Heartbeat::Lost => Tick::LinkLost,
                Heartbeat::Pending | Heartbeat::Renewed => Tick::Idle,
            },
            ControllerMode::Replaying(replay) => {
                if !replay.tick() {
                    return Tick::Idle;
                }
                match replay.advance(stack, clock) {
                    Some(record) => Tick::Leg(record),
                    None => Tick::Finished,
                }
            }
        }
    }
}

/// Coarse controller status reported to the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Remote,
    Returning,
    /// The return trip is complete. The application must restart the device.
    Finished,
}

/// All mutable control state.
pub struct ControllerState {
    pub(super) stack: MoveStack,
    pub(super) mode: ControllerMode,
    pub(super) guard: ObstacleGuard,
    pub(super) gear: Gear,
    /// Motion currently requested, even while held for an obstacle.
    pub(super) motion: Motion,
    /// Move that undoes the current leg.
    pub(super) restore: Motion,
    pub(super) last_command: Option<Command>,
}

impl ControllerState {
    fn new(config: &ControllerConfig) -> Self {
        let window = Schedule::from_millis(config.heartbeat_ms, config.tick_hz);
        Self {
            stack: MoveStack::new(),
            mode: ControllerMode::Remote(Watchdog::new(window, config.exempt_parked)),
            guard: ObstacleGuard::new(config.obstacle_threshold_cm),
            gear: Gear::MIN,
            motion: Motion::Stop,
            restore: Motion::Stop,
            last_command: None,
        }
    }

    pub fn stack(&self) -> &MoveStack {
        &self.stack
    }

    pub fn mode(&self) -> &ControllerMode {
        &self.mode
    }

    pub fn guard(&self) -> &ObstacleGuard {
        &self.guard
    }

    #[inline]
    pub fn gear(&self) -> Gear {
        self.gear
    }

    #[inline]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Most recent remote command other than a keep-alive.
    #[inline]
    pub fn last_command(&self) -> Option<Command> {
        self.last_command
    }

    /// The remote left the vehicle standing (or has not moved it yet).
    fn parked(&self) -> bool {
        matches!(
            self.last_command,
            None | Some(Command::Stop) | Some(Command::SendMessage)
        )
    }
}

pub struct Controller<T, M, L> {
    pub(super) clock: TickClock<T>,
    pub(super) actuator: M,
    pub(super) link: L,
    pub(super) parser: Parser,
    pub(super) state: ControllerState,
    pub(super) config: ControllerConfig,
}

impl<T, M, L> Controller<T, M, L>
where
    T: Timebase,
    M: MotionActuator,
    L: CommandLink,
{
    /// Take over the collaborators and start the first heartbeat window.
    ///
    /// The timebase must already be running.
    pub fn new(timebase: T, mut actuator: M, link: L, config: ControllerConfig) -> Self {
        let mut clock = TickClock::new(timebase);
        let mut state = ControllerState::new(&config);
        if let ControllerMode::Remote(watchdog) = &mut state.mode {
            watchdog.arm(&mut clock);
        }
        actuator.set_gear(state.gear);

        Self {
            clock,
            actuator,
            link,
            parser: Parser::new(),
            state,
            config,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn clock(&self) -> &TickClock<T> {
        &self.clock
    }

    /// Platform access to the link, e.g. to read the received byte.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn actuator(&self) -> &M {
        &self.actuator
    }

    pub fn actuator_mut(&mut self) -> &mut M {
        &mut self.actuator
    }

    pub fn status(&self) -> Status {
        match &self.state.mode {
            ControllerMode::Remote(_) => Status::Remote,
            ControllerMode::Replaying(replay) if replay.is_finished() => Status::Finished,
            ControllerMode::Replaying(_) => Status::Returning,
        }
    }

    /// Handle the overflow latched by the timebase, if it was not already handled. Call from the
    /// overflow interrupt.
    pub fn service_overflow(&mut self) -> Status {
        if self.clock.take_overflow() {
            self.on_overflow()
        } else {
            self.status()
        }
    }

    /// Handle one timebase overflow.
    ///
    /// For platforms that deliver overflows directly instead of latching them in the timebase.
    pub fn on_overflow(&mut self) -> Status {
        self.clock.on_overflow();

        let parked = self.state.parked();
        let tick = self
            .state
            .mode
            .tick(&mut self.state.stack, &mut self.clock, parked);

        match tick {
            Tick::Idle => {}
            Tick::LinkLost => {
                log::info!("link lost, returning");
                self.start_return();
            }
            Tick::Leg(record) => self.drive_leg(record),
            Tick::Finished => self.finish(),
        }
        self.status()
    }

    /// Act on fresh range readings. Call from the main loop.
    pub fn poll_obstacles(&mut self, readings: RangeReadings) {
        self.catch_up();

        let heading = self.state.motion.heading();
        match self.state.guard.poll(heading, readings) {
            GuardAction::Idle => {}
            GuardAction::Halt => {
                self.actuator.drive(Motion::Stop);
                self.clock.pause();
            }
            GuardAction::Resume => {
                self.actuator.drive(self.state.motion);
                self.clock.resume();
            }
        }
    }

    /// Account for an overflow that fired while its interrupt was held off.
    pub(super) fn catch_up(&mut self) {
        if self.clock.take_overflow() {
            self.on_overflow();
        }
    }

    /// Close the current leg and push the move that undoes it.
    pub(super) fn record_leg(&mut self) {
        let elapsed = self.clock.lap();
        let motion = self.state.restore;
        if motion == Motion::Stop && !self.config.record_stops {
            return;
        }

        let record = MoveRecord {
            motion,
            gear: self.state.gear,
            elapsed,
        };
        match self.state.stack.push(record) {
            Ok(()) => log::debug!("recorded {:?} for {} ticks", motion, elapsed.total_ticks()),
            Err(e) => log::warn!("{e}"),
        }
    }

    /// Drive `motion`, unless it heads into a blocked side.
    pub(super) fn apply_motion(&mut self, motion: Motion) {
        self.state.motion = motion;

        let heading = motion.heading();
        if self.state.guard.blocks(heading) {
            self.actuator.drive(Motion::Stop);
            return;
        }
        if self.state.guard.is_halted() {
            // Turned away from the obstacle.
            self.state.guard.clear();
            self.clock.resume();
        }
        self.actuator.drive(motion);
    }

    pub(super) fn apply_gear(&mut self, gear: Gear) {
        self.state.gear = gear;
        self.actuator.set_gear(gear);
    }

    /// Leave remote control and start retracing the recorded path.
    pub(super) fn start_return(&mut self) {
        self.record_leg();
        self.apply_motion(Motion::Stop);
        self.state.restore = Motion::Stop;
        self.link.disable();

        log::info!("returning over {} legs", self.state.stack.len());
        let mut replay = ReplayEngine::new();
        let first = replay.advance(&mut self.state.stack, &mut self.clock);
        self.state.mode = ControllerMode::Replaying(replay);

        match first {
            Some(record) => self.drive_leg(record),
            None => self.finish(),
        }
    }

    fn drive_leg(&mut self, record: MoveRecord) {
        log::debug!(
            "replay {:?} in gear {} for {} ticks",
            record.motion,
            record.gear.level(),
            record.elapsed.total_ticks()
        );
        self.apply_gear(record.gear);
        self.apply_motion(record.motion);
    }

    fn finish(&mut self) {
        self.apply_motion(Motion::Stop);
        log::info!("return complete");
    }
}
