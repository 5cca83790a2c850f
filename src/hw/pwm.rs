// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hardware PWM on TIM4 channels 1 to 4.
//!
//! 255 counts per period (`ARR = 254`) so an 8-bit duty maps straight onto the compare register:
//! 0 is always low, 255 (`CCR > ARR`) is always high.

use stm32f7xx_hal::pac;

/// Target PWM frequency. The prescaler rounds, so the real one lands close by.
pub const PWM_FREQ_HZ: u32 = 1_000;

const COUNTS: u32 = 255;

// OCxM = PWM mode 1, OCxPE = preload, for both channels of a CCMR register.
const CCMR_PWM1_PRELOAD: u32 = 0x6868;
// CC1E | CC2E | CC3E | CC4E
const CCER_ALL: u32 = 0x1111;
// ARPE | CEN
const CR1_RUN: u32 = 0x81;

pub struct Pwm {
    tim: pac::TIM4,
}

impl Pwm {
    /// Start TIM4 with every channel at 0 % duty. `timer_clock_hz` is the APB1 timer clock.
    pub fn tim4(tim4: pac::TIM4, timer_clock_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let tim = tim4;
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let psc = (timer_clock_hz / (PWM_FREQ_HZ * COUNTS)).saturating_sub(1);
        tim.psc.write(|w| unsafe { w.bits(psc) });
        tim.arr.write(|w| unsafe { w.bits(COUNTS - 1) });

        tim.ccmr1_output().write(|w| unsafe { w.bits(CCMR_PWM1_PRELOAD) });
        tim.ccmr2_output().write(|w| unsafe { w.bits(CCMR_PWM1_PRELOAD) });

        let mut pwm = Self { tim };
        for ch in 1..=4 {
            pwm.set_duty(ch, 0);
        }

        pwm.tim.ccer.write(|w| unsafe { w.bits(CCER_ALL) });
        pwm.tim.egr.write(|w| w.ug().set_bit());
        pwm.tim.cr1.write(|w| unsafe { w.bits(CR1_RUN) });

        pwm
    }

    /// Set the duty of channel `ch` (1..=4). Takes effect at the next period.
    pub fn set_duty(&mut self, ch: u8, duty: u8) {
        let ccr = u32::from(duty);
        match ch {
            1 => self.tim.ccr1.write(|w| unsafe { w.bits(ccr) }),
            2 => self.tim.ccr2.write(|w| unsafe { w.bits(ccr) }),
            3 => self.tim.ccr3.write(|w| unsafe { w.bits(ccr) }),
            4 => self.tim.ccr4.write(|w| unsafe { w.bits(ccr) }),
            _ => {}
        }
    }

    #[inline]
    pub fn free(self) -> pac::TIM4 {
        self.tim
    }
}
