// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Remote command handling.

use crate::control::controller::{Controller, ControllerMode};
use crate::motion::Motion;
use crate::protocol::{Command, Event, Message};
use crate::timing::Timebase;
use crate::traits::{CommandLink, MotionActuator};

/// Side effect on a peripheral outside the drivetrain, for the application to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    ClearDisplay,
    ShowMessage(Message),
    Buzzer(bool),
}

impl<T, M, L> Controller<T, M, L>
where
    T: Timebase,
    M: MotionActuator,
    L: CommandLink,
{
    /// Handle one byte from the remote link. Call from the receive interrupt.
    ///
    /// Bytes are ignored once the vehicle is returning.
    pub fn on_byte(&mut self, byte: u8) -> Option<Effect> {
        self.catch_up();

        let ControllerMode::Remote(watchdog) = &mut self.state.mode else {
            return None;
        };

        let collecting = self.parser.in_message();
        let event = self.parser.push(byte);
        if collecting || event.is_some() {
            watchdog.feed();
        }

        match event? {
            Event::Command(cmd) => self.dispatch(cmd),
            Event::Message(text) => Some(Effect::ShowMessage(text)),
        }
    }

    /// Apply a decoded remote command.
    pub fn dispatch(&mut self, cmd: Command) -> Option<Effect> {
        if cmd != Command::KeepAlive {
            self.state.last_command = Some(cmd);
        }

        match cmd {
            Command::KeepAlive | Command::SendMessage => None,

            Command::Forward
            | Command::Backward
            | Command::Stop
            | Command::SteerRight
            | Command::SteerLeft => {
                let motion = cmd.motion().unwrap_or(Motion::Stop);
                self.change_motion(motion);
                None
            }

            Command::GearUp => {
                if let Some(gear) = self.state.gear.up() {
                    self.record_leg();
                    self.apply_gear(gear);
                }
                None
            }
            Command::GearDown => {
                if let Some(gear) = self.state.gear.down() {
                    self.record_leg();
                    self.apply_gear(gear);
                }
                None
            }

            Command::RequestReverse => {
                log::info!("return requested");
                self.start_return();
                None
            }

            Command::ClearScreen => Some(Effect::ClearDisplay),
            Command::BuzzerOn => Some(Effect::Buzzer(true)),
            Command::BuzzerOff => Some(Effect::Buzzer(false)),
        }
    }

    fn change_motion(&mut self, motion: Motion) {
        self.record_leg();
        self.apply_motion(motion);
        self.state.restore = motion.inverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;
    use crate::control::Status;
    use crate::mock::{MockActuator, MockLink, MockTimebase};
    use crate::motion::Gear;

    #[test]
    fn motion_pushes_the_inverse_of_the_superseded_leg() {
        let tb = MockTimebase::new();
        let act = MockActuator::new();
        let link = MockLink::new();
        let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

        ctrl.on_byte(b'5');
        tb.run(700, || {
            ctrl.on_overflow();
        });
        ctrl.on_byte(b'1');

        let stack = ctrl.state().stack().as_slice();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack[0].motion, Motion::SteerRight);
        assert_eq!(stack[0].elapsed.total_ticks(), 700);
        assert_eq!(act.current(), Motion::Forward);
    }

    #[test]
    fn gear_changes_are_clamped_and_recorded() {
        let tb = MockTimebase::new();
        let act = MockActuator::new();
        let link = MockLink::new();
        let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

        ctrl.on_byte(b'1');
        tb.run(100, || {
            ctrl.on_overflow();
        });
        ctrl.on_byte(b'6');
        assert_eq!(act.gear(), Gear::new(2).unwrap());

        // The leg before the change keeps the gear it was driven in.
        let rec = ctrl.state().stack().as_slice()[0];
        assert_eq!(rec.motion, Motion::Backward);
        assert_eq!(rec.gear, Gear::MIN);
        assert_eq!(rec.elapsed.total_ticks(), 100);

        for _ in 0..10 {
            ctrl.on_byte(b'6');
        }
        assert_eq!(ctrl.state().gear(), Gear::MAX);
        assert_eq!(ctrl.state().stack().len(), 4);

        // Already at the bottom: nothing recorded.
        let mut low = Controller::new(&tb, &act, &link, ControllerConfig::default());
        low.on_byte(b'7');
        assert!(low.state().stack().is_empty());
    }

    #[test]
    fn peripheral_commands_leave_the_stack_alone() {
        let tb = MockTimebase::new();
        let act = MockActuator::new();
        let link = MockLink::new();
        let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

        assert_eq!(ctrl.on_byte(b'8'), Some(Effect::ClearDisplay));
        assert_eq!(ctrl.on_byte(b'o'), Some(Effect::Buzzer(true)));
        assert_eq!(ctrl.on_byte(b'f'), Some(Effect::Buzzer(false)));
        assert_eq!(ctrl.on_byte(b'9'), None);

        let mut shown = None;
        for &b in b"HELLO:" {
            shown = ctrl.on_byte(b).or(shown);
        }
        let Some(Effect::ShowMessage(text)) = shown else {
            panic!("no message shown");
        };
        assert_eq!(text.as_slice(), b"HELLO");
        assert!(ctrl.state().stack().is_empty());
        assert!(act.history().is_empty());
    }

    #[test]
    fn unknown_bytes_change_nothing() {
        let tb = MockTimebase::new();
        let act = MockActuator::new();
        let link = MockLink::new();
        let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

        ctrl.on_byte(b'1');
        tb.run(50, || {
            ctrl.on_overflow();
        });
        for b in [b'x', 0x00, b':', b'A'] {
            assert_eq!(ctrl.on_byte(b), None);
        }
        assert_eq!(ctrl.state().stack().len(), 0);
        assert_eq!(ctrl.state().last_command(), Some(Command::Forward));
        assert_eq!(ctrl.clock().elapsed_ticks(), 50);
    }

    #[test]
    fn request_reverse_disables_the_link() {
        let tb = MockTimebase::new();
        let act = MockActuator::new();
        let link = MockLink::new();
        let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

        ctrl.on_byte(b'2');
        tb.run(1000, || {
            ctrl.on_overflow();
        });
        ctrl.on_byte(b';');

        assert!(!link.is_enabled());
        assert_eq!(ctrl.status(), Status::Returning);
        assert_eq!(act.current(), Motion::Forward);

        // Remote input is ignored from now on.
        assert_eq!(ctrl.on_byte(b'8'), None);
        ctrl.on_byte(b'5');
        assert_eq!(act.current(), Motion::Forward);
    }
}
