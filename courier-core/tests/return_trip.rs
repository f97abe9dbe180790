// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! End-to-end behavior of the controller against mock hardware.

use courier_core::control::{MoveRecord, RangeReadings, MOVE_STACK_CAPACITY};
use courier_core::mock::{Drive, MockActuator, MockLink, MockTimebase};
use courier_core::timing::Elapsed;
use courier_core::{Controller, ControllerConfig, Gear, Motion, Status};

type TestController<'a> = Controller<&'a MockTimebase, &'a MockActuator<'a>, &'a MockLink>;

/// Heartbeat window used by the default configuration, in ticks.
const WINDOW_TICKS: u64 = 156_250;

fn run(tb: &MockTimebase, ctrl: &mut TestController<'_>, ticks: u64) {
    tb.run(ticks, || {
        ctrl.on_overflow();
    });
}

/// Run until the controller reports `Finished`, failing after `limit` ticks.
fn run_to_finish(tb: &MockTimebase, ctrl: &mut TestController<'_>, limit: u64) {
    let mut done = false;
    tb.run(limit, || {
        if !done && ctrl.on_overflow() == Status::Finished {
            done = true;
        }
    });
    assert!(done, "return did not finish within {limit} ticks");
}

fn leg_durations(history: &[Drive]) -> impl Iterator<Item = (Motion, u64)> + '_ {
    history
        .windows(2)
        .map(|pair| (pair[0].motion, pair[1].at - pair[0].at))
}

#[test]
fn silence_after_two_moves_retraces_them() {
    let tb = MockTimebase::new();
    let act = MockActuator::with_clock(&tb);
    let link = MockLink::new();
    let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

    ctrl.on_byte(b'1');
    run(&tb, &mut ctrl, 2000);
    ctrl.on_byte(b'5');
    run(&tb, &mut ctrl, 500);
    ctrl.on_byte(b'3');

    let g = Gear::MIN;
    assert_eq!(
        ctrl.state().stack().as_slice(),
        &[
            MoveRecord {
                motion: Motion::Backward,
                gear: g,
                elapsed: Elapsed::from_ticks(2000),
            },
            MoveRecord {
                motion: Motion::SteerRight,
                gear: g,
                elapsed: Elapsed::from_ticks(500),
            },
        ]
    );

    // The window holding the commands passes, the next silent one loses the link.
    act.clear_history();
    run(&tb, &mut ctrl, 2 * WINDOW_TICKS - 2500 - 1);
    assert_eq!(ctrl.status(), Status::Remote);
    run(&tb, &mut ctrl, 1);
    assert_eq!(ctrl.status(), Status::Returning);
    assert!(!link.is_enabled());

    run_to_finish(&tb, &mut ctrl, 10_000);

    let history = act.history();
    let legs: heapless::Vec<(Motion, u64), 8> = leg_durations(&history).collect();
    assert_eq!(
        legs.as_slice(),
        &[
            (Motion::Stop, 0),
            (Motion::SteerRight, 500),
            (Motion::Backward, 2000)
        ]
    );
    assert_eq!(act.current(), Motion::Stop);
}

#[test]
fn leg_in_progress_at_link_loss_is_retraced_first() {
    let tb = MockTimebase::new();
    let act = MockActuator::with_clock(&tb);
    let link = MockLink::new();
    let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

    ctrl.on_byte(b'1');
    run(&tb, &mut ctrl, 2000);
    ctrl.on_byte(b'5');
    act.clear_history();

    // No STOP: the vehicle is still steering left when the link goes quiet.
    let silence = 2 * WINDOW_TICKS - 2500;
    run(&tb, &mut ctrl, 500 + silence - 1);
    assert_eq!(ctrl.status(), Status::Remote);
    run(&tb, &mut ctrl, 1);
    assert_eq!(ctrl.status(), Status::Returning);

    // The closing leg was pushed and popped straight back off for replay.
    assert_eq!(
        ctrl.state().stack().as_slice(),
        &[MoveRecord {
            motion: Motion::Backward,
            gear: Gear::MIN,
            elapsed: Elapsed::from_ticks(2000),
        }]
    );

    run_to_finish(&tb, &mut ctrl, 3 * WINDOW_TICKS);

    let history = act.history();
    let legs: heapless::Vec<(Motion, u64), 8> = leg_durations(&history).collect();
    assert_eq!(
        legs.as_slice(),
        &[
            (Motion::Stop, 0),
            (Motion::SteerRight, 500 + silence),
            (Motion::Backward, 2000)
        ]
    );
}

#[test]
fn overflow_latched_during_return_request_keeps_the_leg_exact() {
    let tb = MockTimebase::new();
    let act = MockActuator::with_clock(&tb);
    let link = MockLink::new();
    let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

    ctrl.on_byte(b'1');
    run(&tb, &mut ctrl, 50);
    let to_wrap = 256 - tb.counter_value() as u64;
    tb.run_masked(to_wrap + 5);
    let outbound = 50 + to_wrap + 5;

    act.clear_history();
    ctrl.on_byte(b';');
    assert_eq!(ctrl.status(), Status::Returning);
    // The overflow interrupt runs late and must not count toward the first replayed leg.
    assert_eq!(ctrl.service_overflow(), Status::Returning);

    run_to_finish(&tb, &mut ctrl, 2000);

    let history = act.history();
    let legs: heapless::Vec<(Motion, u64), 8> = leg_durations(&history).collect();
    assert_eq!(
        legs.as_slice(),
        &[(Motion::Stop, 0), (Motion::Backward, outbound)]
    );
}

#[test]
fn return_time_matches_recorded_time() {
    let tb = MockTimebase::new();
    let act = MockActuator::with_clock(&tb);
    let link = MockLink::new();
    let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

    let script: [(u8, u64); 8] = [
        (b'1', 1234),
        (b'4', 255),
        (b'2', 256),
        (b'6', 3000),
        (b'5', 1),
        (b'1', 77_777),
        (b'7', 512),
        (b'2', 900),
    ];
    let mut outbound = 0;
    for (byte, ticks) in script {
        ctrl.on_byte(byte);
        run(&tb, &mut ctrl, ticks);
        outbound += ticks;
    }

    act.clear_history();
    ctrl.on_byte(b';');
    let started = tb.now();
    run_to_finish(&tb, &mut ctrl, 200_000);

    let history = act.history();
    let finished_at = history.last().map(|d| d.at).unwrap();
    assert_eq!(finished_at - started, outbound);

    // One leg per recorded record, gear restored with each.
    let driven: heapless::Vec<Drive, 16> = history
        .iter()
        .copied()
        .filter(|d| d.motion != Motion::Stop)
        .collect();
    assert_eq!(driven.len(), script.len());
    assert_eq!(driven[0].motion, Motion::Forward);
    assert_eq!(driven.last().unwrap().motion, Motion::Backward);
    assert!(driven.iter().any(|d| d.gear == Gear::new(2).unwrap()));
}

#[test]
fn regular_traffic_never_triggers_a_return() {
    let tb = MockTimebase::new();
    let act = MockActuator::new();
    let link = MockLink::new();
    let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

    ctrl.on_byte(b'1');
    for i in 0..200 {
        // Alternate keep-alives and real commands, one per window.
        let byte = if i % 2 == 0 { b'0' } else { b'1' };
        run(&tb, &mut ctrl, WINDOW_TICKS - 1);
        ctrl.on_byte(byte);
        run(&tb, &mut ctrl, 1);
        assert_eq!(ctrl.status(), Status::Remote);
    }
    assert!(link.is_enabled());
}

#[test]
fn link_loss_starts_exactly_one_return() {
    let tb = MockTimebase::new();
    let act = MockActuator::new();
    let link = MockLink::new();
    let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

    ctrl.on_byte(b'1');
    run(&tb, &mut ctrl, 100_000);

    let mut transitions = 0;
    let mut last = ctrl.status();
    tb.run(4 * WINDOW_TICKS, || {
        let status = ctrl.on_overflow();
        if last == Status::Remote && status != Status::Remote {
            transitions += 1;
        }
        last = status;
    });

    assert_eq!(transitions, 1);
    assert_eq!(ctrl.state().stack().len(), 0);
    assert_eq!(ctrl.status(), Status::Finished);
}

#[test]
fn obstacle_pause_does_not_count_toward_the_leg() {
    let tb = MockTimebase::new();
    let act = MockActuator::new();
    let link = MockLink::new();
    let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

    let clear = RangeReadings {
        front_cm: Some(80),
        back_cm: Some(80),
    };
    let wall = RangeReadings {
        front_cm: Some(4),
        back_cm: Some(80),
    };

    ctrl.on_byte(b'1');
    run(&tb, &mut ctrl, 600);
    ctrl.poll_obstacles(wall);
    // Far longer than a heartbeat window: the watchdog is frozen too.
    run(&tb, &mut ctrl, 5 * WINDOW_TICKS);
    ctrl.poll_obstacles(wall);
    ctrl.poll_obstacles(clear);
    run(&tb, &mut ctrl, 400);
    ctrl.on_byte(b'3');

    assert_eq!(ctrl.status(), Status::Remote);
    let rec = ctrl.state().stack().as_slice()[0];
    assert_eq!(rec.motion, Motion::Backward);
    assert_eq!(rec.elapsed.total_ticks(), 1000);
}

#[test]
fn obstacle_during_return_delays_but_keeps_durations() {
    let tb = MockTimebase::new();
    let act = MockActuator::with_clock(&tb);
    let link = MockLink::new();
    let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

    ctrl.on_byte(b'2');
    run(&tb, &mut ctrl, 3000);
    act.clear_history();
    ctrl.on_byte(b';');
    assert_eq!(act.current(), Motion::Forward);

    run(&tb, &mut ctrl, 1000);
    ctrl.poll_obstacles(RangeReadings {
        front_cm: Some(2),
        back_cm: None,
    });
    assert_eq!(act.current(), Motion::Stop);
    run(&tb, &mut ctrl, 50_000);
    assert_eq!(ctrl.status(), Status::Returning);

    ctrl.poll_obstacles(RangeReadings {
        front_cm: Some(40),
        back_cm: None,
    });
    assert_eq!(act.current(), Motion::Forward);
    run_to_finish(&tb, &mut ctrl, 10_000);

    // Forward while running, held, forward again, then the final stop.
    let history = act.history();
    let moving: u64 = leg_durations(&history)
        .filter(|(m, _)| *m == Motion::Forward)
        .map(|(_, ticks)| ticks)
        .sum();
    assert_eq!(moving, 3000);
}

#[test]
fn stack_bound_holds_past_capacity() {
    let tb = MockTimebase::new();
    let act = MockActuator::new();
    let link = MockLink::new();
    let mut ctrl = Controller::new(&tb, &act, &link, ControllerConfig::default());

    ctrl.on_byte(b'1');
    for i in 0..MOVE_STACK_CAPACITY + 1 {
        run(&tb, &mut ctrl, 10);
        ctrl.on_byte(if i % 2 == 0 { b'4' } else { b'1' });
    }

    let stack = ctrl.state().stack();
    assert_eq!(stack.len(), MOVE_STACK_CAPACITY);
    assert_eq!(stack.as_slice()[0].motion, Motion::Backward);
    assert!(stack.as_slice().iter().all(|r| r.elapsed.total_ticks() == 10));
}
