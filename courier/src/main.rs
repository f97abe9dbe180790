// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::delay::Delay;
use cortex_m::interrupt::Mutex;
use cortex_m::peripheral::{NVIC, SCB};
use cortex_m_rt::entry;
use heapless::Deque;
use log::LevelFilter;
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{self, Config, Serial},
};
use stm32f7xx_hal as hal;

use courier::config;
use courier::drivers::{Drivetrain, HcSr04, Lcd};
use courier::hw::{pins::CarPins, Buzzer, CommandRx, GearPwm, Micros, TickTimer, Usart};
use courier::logger;
use courier_core::control::{Effect, RangeReadings};
use courier_core::{Controller, Gear, Status};

type CarController = Controller<TickTimer, Drivetrain, CommandRx<pac::USART2>>;

/// Effects waiting for the main loop; the display is too slow to drive from an interrupt.
const EFFECT_QUEUE: usize = 8;

/// State shared by the main loop and both interrupt handlers.
struct Shared {
    ctrl: CarController,
    effects: Deque<Effect, EFFECT_QUEUE>,
}

static SHARED: Mutex<RefCell<Option<Shared>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    // Peripherals
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    let pins = CarPins::new(dp.GPIOB, dp.GPIOD, dp.GPIOE, dp.GPIOF);

    // USART3 (DBG)
    let dbg_cfg = Config {
        baud_rate: config::DEBUG_BAUD.bps(),
        ..Default::default()
    };
    let dbg = Serial::new(dp.USART3, (pins.usart3.tx, pins.usart3.rx), &clocks, dbg_cfg);
    // Nothing else installs a logger, so this cannot fail.
    logger::init(Usart::new(dbg), LevelFilter::Info).ok();

    // USART2 (remote)
    let remote_cfg = Config {
        baud_rate: config::REMOTE_BAUD.bps(),
        ..Default::default()
    };
    let mut remote = Serial::new(dp.USART2, (pins.usart2.tx, pins.usart2.rx), &clocks, remote_cfg);
    remote.listen(serial::Event::Rxne);
    let (_remote_tx, remote_rx) = remote.split();
    let link = CommandRx::new(remote_rx, pac::Interrupt::USART2);

    // Drivetrain. The enable pins stay in their TIM4 alternate function.
    let _enable = pins.enable;
    let pwm = GearPwm::tim4(dp.TIM4, config::PWM_PRESCALER, Gear::MIN);
    let drivetrain = Drivetrain::new(pins.drive, pwm, config::STEERING);

    // Sensors and UI
    let micros = Micros::tim2(dp.TIM2, config::TIMER_CLOCK_HZ);
    let sysclk = clocks.sysclk().raw();
    let mut front = HcSr04::new(pins.front, &micros, sysclk, config::ECHO_TIMEOUT_US);
    let mut back = HcSr04::new(pins.back, &micros, sysclk, config::ECHO_TIMEOUT_US);
    let mut lcd = Lcd::new(pins.lcd, Delay::new(cp.SYST, sysclk));
    let mut buzzer = Buzzer::active_high(pins.buzzer);
    lcd.write_bytes(b"Courier ready");

    // Start the timebase last so no overflow predates the controller.
    let ticks = TickTimer::tim3(dp.TIM3, config::TICK_PRESCALER);
    let ctrl = Controller::new(ticks, drivetrain, link, config::controller());

    cortex_m::interrupt::free(|cs| {
        let mut shared = Shared {
            ctrl,
            effects: Deque::new(),
        };
        shared.ctrl.link_mut().enable();
        SHARED.borrow(cs).replace(Some(shared));
        unsafe { NVIC::unmask(pac::Interrupt::TIM3) };
    });
    log::info!("courier up, tick {} Hz", config::TICK_HZ);

    let mut shown = Status::Remote;
    loop {
        // Ranging blocks for up to the echo timeout, so it stays outside the critical section.
        let readings = RangeReadings::sample(&mut front, &mut back);

        let (mut effects, status) = cortex_m::interrupt::free(|cs| {
            let mut shared = SHARED.borrow(cs).borrow_mut();
            match shared.as_mut() {
                Some(shared) => {
                    shared.ctrl.poll_obstacles(readings);
                    restart_if_finished(&shared.ctrl);
                    let effects = core::mem::replace(&mut shared.effects, Deque::new());
                    (effects, shared.ctrl.status())
                }
                None => (Deque::new(), Status::Remote),
            }
        });

        while let Some(effect) = effects.pop_front() {
            match effect {
                Effect::ClearDisplay => lcd.clear(),
                Effect::ShowMessage(text) => {
                    lcd.clear();
                    lcd.write_bytes(&text);
                }
                Effect::Buzzer(on) => buzzer.set(on),
            }
        }

        if status == Status::Returning && shown != Status::Returning {
            lcd.clear();
            lcd.write_bytes(b"Returning home");
        }
        shown = status;
    }
}

#[interrupt]
fn TIM3() {
    cortex_m::interrupt::free(|cs| {
        let mut shared = SHARED.borrow(cs).borrow_mut();
        if let Some(shared) = shared.as_mut() {
            shared.ctrl.service_overflow();
            restart_if_finished(&shared.ctrl);
        }
    });
}

#[interrupt]
fn USART2() {
    cortex_m::interrupt::free(|cs| {
        let mut shared = SHARED.borrow(cs).borrow_mut();
        let Some(shared) = shared.as_mut() else {
            return;
        };
        let Some(byte) = shared.ctrl.link_mut().read() else {
            return;
        };

        // A latched overflow handled on the way in can end the return trip.
        let effect = shared.ctrl.on_byte(byte);
        restart_if_finished(&shared.ctrl);

        if let Some(effect) = effect {
            if shared.effects.push_back(effect).is_err() {
                log::warn!("effect queue full, dropped");
            }
        }
    });
}

/// The vehicle is home: flush the log and restart in remote mode.
fn restart_if_finished(ctrl: &CarController) {
    if ctrl.status() == Status::Finished {
        log::logger().flush();
        SCB::sys_reset();
    }
}
