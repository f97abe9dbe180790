// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! TIM3 as the controller's 8-bit tick counter.
//!
//! The timer counts up from its current value to an auto-reload of 255 and raises an update
//! interrupt on every wrap. The update flag doubles as the latched overflow of
//! [`Timebase::take_overflow`], so the `TIM3` handler only needs to call
//! `Controller::service_overflow`.

use courier_core::timing::Timebase;
use stm32f7xx_hal::pac;

pub struct TickTimer {
    tim: pac::TIM3,
}

impl TickTimer {
    /// Configure TIM3 to tick at `timer_clock_hz / prescaler` and start it with the update
    /// interrupt enabled.
    pub fn tim3(tim3: pac::TIM3, prescaler: u16) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        let tim = tim3;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| unsafe { w.bits(prescaler.saturating_sub(1) as u32) });
        tim.arr.write(|w| unsafe { w.bits(0xFF) });

        // Load the prescaler now, then drop the update flag that caused.
        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());

        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.dier.modify(|_, w| w.uie().set_bit());
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    pub fn free(self) -> pac::TIM3 {
        self.tim
    }
}

impl Timebase for TickTimer {
    #[inline]
    fn counter(&self) -> u8 {
        self.tim.cnt.read().bits() as u8
    }

    #[inline]
    fn set_counter(&mut self, value: u8) {
        self.tim.cnt.write(|w| unsafe { w.bits(value as u32) });
    }

    #[inline]
    fn pause(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().clear_bit());
    }

    #[inline]
    fn resume(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    #[inline]
    fn is_running(&self) -> bool {
        self.tim.cr1.read().cen().bit_is_set()
    }

    #[inline]
    fn take_overflow(&mut self) -> bool {
        let pending = self.tim.sr.read().uif().bit_is_set();
        if pending {
            self.tim.sr.modify(|_, w| w.uif().clear_bit());
        }
        pending
    }
}
