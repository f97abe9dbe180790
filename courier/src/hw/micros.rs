// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running microsecond counter on TIM2 (32-bit).
//!
//! Timestamps the range sensors' echo pulses.

use stm32f7xx_hal::pac;

pub struct Micros {
    tim: pac::TIM2,
}

impl Micros {
    /// Configure TIM2 to count at 1 MHz from a timer clock of `timer_clock_hz`.
    pub fn tim2(tim2: pac::TIM2, timer_clock_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        let tim = tim2;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let psc = (timer_clock_hz / 1_000_000).saturating_sub(1);
        tim.psc.write(|w| unsafe { w.bits(psc) });

        // Auto-reload: max 32-bit
        tim.arr.write(|w| w.bits(0xFFFF_FFFF));

        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());

        tim.cnt.write(|w| w.bits(0));
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Microseconds since the counter started, wrapping every ~71 minutes.
    #[inline]
    pub fn now(&self) -> u32 {
        self.tim.cnt.read().cnt().bits()
    }

    /// Microseconds since `start`, correct across one wrap.
    #[inline]
    pub fn since(&self, start: u32) -> u32 {
        self.now().wrapping_sub(start)
    }

    pub fn free(self) -> pac::TIM2 {
        self.tim
    }
}
