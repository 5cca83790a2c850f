// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Millisecond clock on TIM2.
//!
//! TIM2 is 32 bits wide, so with a 1 kHz tick it free-runs and wraps at `u32::MAX` exactly like
//! the `millis()` counter the protocol expects. No interrupt is involved.

use stm32f7xx_hal::pac;

pub struct Millis {
    tim: pac::TIM2,
}

impl Millis {
    /// Start TIM2 counting milliseconds from zero. `timer_clock_hz` is the APB1 timer clock.
    pub fn tim2(tim2: pac::TIM2, timer_clock_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        let tim = tim2;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let psc = (timer_clock_hz / 1_000).saturating_sub(1);
        tim.psc.write(|w| unsafe { w.bits(psc) });

        // Auto-reload: max 32-bit
        tim.arr.write(|w| unsafe { w.bits(0xFFFF_FFFF) });

        // Load the prescaler now rather than at the first overflow.
        tim.egr.write(|w| w.ug().set_bit());
        tim.cnt.write(|w| unsafe { w.bits(0) });

        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    #[inline]
    pub fn now(&self) -> u32 {
        self.tim.cnt.read().bits()
    }

    #[inline]
    pub fn free(self) -> pac::TIM2 {
        self.tim
    }
}
