// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the Courier vehicle on a NUCLEO-F767ZI board.

use stm32f7xx_hal::{
    gpio::{self, gpiob, gpiod, gpioe, gpiof, Alternate, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```rust
/// let pins = CarPins::new(dp.GPIOB, dp.GPIOD, dp.GPIOE, dp.GPIOF);
/// ```
pub struct CarPins {
    pub usart3: Usart3Pins,
    pub usart2: Usart2Pins,
    pub drive: DrivePins,
    pub enable: EnablePins,
    pub front: SonarPins<'E', 2, 'E', 3>,
    pub back: SonarPins<'E', 4, 'E', 5>,
    pub lcd: LcdPins,
    pub buzzer: gpiob::PB8<Output<PushPull>>,
}

/// Debug port (ST-LINK virtual COM port)
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// Remote link (Bluetooth serial module)
pub struct Usart2Pins {
    pub tx: gpiod::PD5<Alternate<7>>,
    pub rx: gpiod::PD6<Alternate<7>>,
}

/// H-bridge direction inputs
pub struct DrivePins {
    pub left_in1: gpioe::PE9<Output<PushPull>>,
    pub left_in2: gpioe::PE11<Output<PushPull>>,
    pub right_in1: gpioe::PE13<Output<PushPull>>,
    pub right_in2: gpioe::PE14<Output<PushPull>>,
}

/// H-bridge enable inputs
pub struct EnablePins {
    pub ena: gpiod::PD12<Alternate<2>>, // TIM4_CH1 (PWM)
    pub enb: gpiod::PD13<Alternate<2>>, // TIM4_CH2 (PWM)
}

/// HC-SR04 trigger and echo
pub struct SonarPins<const TP: char, const TN: u8, const EP: char, const EN: u8> {
    pub trig: gpio::Pin<TP, TN, Output<PushPull>>,
    pub echo: gpio::Pin<EP, EN, Input<Floating>>,
}

/// HD44780 in 4-bit mode
pub struct LcdPins {
    pub rs: gpiof::PF0<Output<PushPull>>,
    pub en: gpiof::PF1<Output<PushPull>>,
    pub d4: gpiof::PF2<Output<PushPull>>,
    pub d5: gpiof::PF3<Output<PushPull>>,
    pub d6: gpiof::PF4<Output<PushPull>>,
    pub d7: gpiof::PF5<Output<PushPull>>,
}

impl CarPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpiob: pac::GPIOB, gpiod: pac::GPIOD, gpioe: pac::GPIOE, gpiof: pac::GPIOF) -> Self {
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();
        let gpiof = gpiof.split();

        Self {
            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            usart2: Usart2Pins {
                tx: gpiod.pd5.into_alternate::<7>(),
                rx: gpiod.pd6.into_alternate::<7>(),
            },

            drive: DrivePins {
                left_in1: gpioe.pe9.into_push_pull_output(),
                left_in2: gpioe.pe11.into_push_pull_output(),
                right_in1: gpioe.pe13.into_push_pull_output(),
                right_in2: gpioe.pe14.into_push_pull_output(),
            },

            enable: EnablePins {
                ena: gpiod.pd12.into_alternate::<2>(),
                enb: gpiod.pd13.into_alternate::<2>(),
            },

            front: SonarPins {
                trig: gpioe.pe2.into_push_pull_output(),
                echo: gpioe.pe3.into_floating_input(),
            },

            back: SonarPins {
                trig: gpioe.pe4.into_push_pull_output(),
                echo: gpioe.pe5.into_floating_input(),
            },

            lcd: LcdPins {
                rs: gpiof.pf0.into_push_pull_output(),
                en: gpiof.pf1.into_push_pull_output(),
                d4: gpiof.pf2.into_push_pull_output(),
                d5: gpiof.pf3.into_push_pull_output(),
                d6: gpiof.pf4.into_push_pull_output(),
                d7: gpiof.pf5.into_push_pull_output(),
            },

            buzzer: gpiob.pb8.into_push_pull_output(),
        }
    }
}
