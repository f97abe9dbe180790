// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Gear PWM on the H-bridge enable lines.
//!
//! TIM4 CH1 and CH2 drive ENA and ENB with the same duty. The period is 256 counts, so a compare
//! value of `gear * 51` gives a duty of roughly `gear / 5`.

use courier_core::Gear;
use stm32f7xx_hal::pac;

pub struct GearPwm {
    tim: pac::TIM4,
}

impl GearPwm {
    /// Configure TIM4 CH1/CH2 as PWM mode 1 outputs, starting at `gear`.
    ///
    /// The channel pins must already be in their TIM4 alternate function.
    pub fn tim4(tim4: pac::TIM4, prescaler: u16, gear: Gear) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let tim = tim4;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| unsafe { w.bits(prescaler.saturating_sub(1) as u32) });
        tim.arr.write(|w| unsafe { w.bits(0xFF) });

        // PWM mode 1 with preload on both channels
        tim.ccmr1_output().modify(|_, w| unsafe {
            w.oc1m()
                .bits(0b110)
                .oc1pe()
                .set_bit()
                .oc2m()
                .bits(0b110)
                .oc2pe()
                .set_bit()
        });
        tim.ccer
            .modify(|_, w| w.cc1p().clear_bit().cc2p().clear_bit().cc1e().set_bit().cc2e().set_bit());

        let mut pwm = Self { tim };
        pwm.set_gear(gear);

        // Auto-reload preload, latch everything, then run.
        pwm.tim.cr1.modify(|_, w| w.arpe().set_bit());
        pwm.tim.egr.write(|w| w.ug().set_bit());
        pwm.tim.cr1.modify(|_, w| w.cen().set_bit());

        pwm
    }

    /// Set both channels' duty from `gear`. Takes effect at the next PWM period.
    pub fn set_gear(&mut self, gear: Gear) {
        let ccr = gear.compare_value() as u32;
        self.tim.ccr1().write(|w| unsafe { w.bits(ccr) });
        self.tim.ccr2().write(|w| unsafe { w.bits(ccr) });
    }

    pub fn free(self) -> pac::TIM4 {
        self.tim
    }
}
