// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ADC1 single conversions using direct PAC register access.
//!
//! Example:
//! ```ignore
//! let mut adc = Adc::adc1(dp.ADC1);
//! let value = adc.read(10);
//! ```

use stm32f7xx_hal::pac;

pub struct Adc {
    adc: pac::ADC1,
}

impl Adc {
    /// Create and initialize ADC1: 12-bit, right-aligned, software trigger.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        // ADC prescaler: PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        // Power off to configure
        adc1.cr2.modify(|_, w| w.adon().clear_bit());

        adc1.cr1.modify(|_, w| w.res().bits(0b00));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });

        // Longest sample time on every channel, for high-impedance sources.
        adc1.smpr1.write(|w| unsafe { w.bits(0x07FF_FFFF) });
        adc1.smpr2.write(|w| unsafe { w.bits(0x3FFF_FFFF) });

        // Sequence length = 1 conversion
        adc1.sqr1.modify(|_, w| w.l().bits(0));

        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    /// Blocking single conversion of `channel`. Takes a few microseconds.
    pub fn read(&mut self, channel: u8) -> u16 {
        let adc = &self.adc;

        adc.sqr3.modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });
        adc.cr2.modify(|_, w| w.swstart().set_bit());

        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits() as u16
    }

    #[inline]
    pub fn free(self) -> pac::ADC1 {
        self.adc
    }
}
