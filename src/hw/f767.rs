// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `Board` implementation for the STM32F767ZI.
//!
//! GPIO is driven through raw MODER/PUPDR/BSRR/IDR access on ports C, D and E, since the REPL
//! reconfigures pins at runtime and the HAL's typestate pins cannot change type after
//! construction. Timing comes from [`Millis`], analog input from [`Adc`] and hardware PWM from
//! [`Pwm`]. See [`pins_f767zi`](super::pins_f767zi) for the pin map.

use stm32f7xx_hal::pac;

use super::adc::Adc;
use super::board::Board;
use super::clock::Millis;
use super::pins::{Pin, PinMode};
use super::pins_f767zi::{self as map, PinLoc, Port};
use super::pwm::Pwm;

const MODER_INPUT: u32 = 0b00;
const MODER_OUTPUT: u32 = 0b01;
const MODER_AF: u32 = 0b10;
const MODER_ANALOG: u32 = 0b11;

const PUPDR_NONE: u32 = 0b00;
const PUPDR_UP: u32 = 0b01;

extern "C" {
    // Start of the heap, right after .bss/.uninit (provided by cortex-m-rt's link.x).
    static __sheap: u8;
}

/// Run `$body` with `$gpio` bound to the register block of `$port`.
macro_rules! with_port {
    ($port:expr, |$gpio:ident| $body:expr) => {
        match $port {
            Port::C => {
                let $gpio = unsafe { &*pac::GPIOC::ptr() };
                $body
            }
            Port::D => {
                let $gpio = unsafe { &*pac::GPIOD::ptr() };
                $body
            }
            Port::E => {
                let $gpio = unsafe { &*pac::GPIOE::ptr() };
                $body
            }
        }
    };
}

fn replace_field(reg: u32, shift: u32, width_mask: u32, value: u32) -> u32 {
    (reg & !(width_mask << shift)) | ((value & width_mask) << shift)
}

fn set_moder(loc: PinLoc, mode: u32) {
    let shift = 2 * u32::from(loc.index);
    with_port!(loc.port, |gpio| gpio
        .moder
        .modify(|r, w| unsafe { w.bits(replace_field(r.bits(), shift, 0b11, mode)) }));
}

fn moder(loc: PinLoc) -> u32 {
    let shift = 2 * u32::from(loc.index);
    with_port!(loc.port, |gpio| (gpio.moder.read().bits() >> shift) & 0b11)
}

fn set_pupdr(loc: PinLoc, pull: u32) {
    let shift = 2 * u32::from(loc.index);
    with_port!(loc.port, |gpio| gpio
        .pupdr
        .modify(|r, w| unsafe { w.bits(replace_field(r.bits(), shift, 0b11, pull)) }));
}

/// Select an alternate function for pins 8..=15 of a port.
fn set_afrh(loc: PinLoc, af: u32) {
    let shift = 4 * u32::from(loc.index.saturating_sub(8));
    with_port!(loc.port, |gpio| gpio
        .afrh
        .modify(|r, w| unsafe { w.bits(replace_field(r.bits(), shift, 0xF, af)) }));
}

fn write_level(loc: PinLoc, high: bool) {
    let bit = if high { loc.index } else { loc.index + 16 };
    with_port!(loc.port, |gpio| gpio
        .bsrr
        .write(|w| unsafe { w.bits(1 << bit) }));
}

fn read_level(loc: PinLoc) -> bool {
    with_port!(loc.port, |gpio| gpio.idr.read().bits() & (1 << loc.index) != 0)
}

pub struct F7Board {
    adc: Adc,
    pwm: Pwm,
    clock: Millis,
}

impl F7Board {
    /// Take over ADC1, TIM2 and TIM4 and put every mapped pin in its reset state.
    ///
    /// `timer_clock_hz` is the APB1 timer clock (the HSI frequency with the default clock tree).
    pub fn new(adc1: pac::ADC1, tim2: pac::TIM2, tim4: pac::TIM4, timer_clock_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.ahb1enr.modify(|_, w| {
            w.gpiocen().set_bit();
            w.gpioden().set_bit();
            w.gpioeen().set_bit();
            w
        });

        let mut board = Self {
            adc: Adc::adc1(adc1),
            pwm: Pwm::tim4(tim4, timer_clock_hz),
            clock: Millis::tim2(tim2, timer_clock_hz),
        };
        board.release_all();
        board
    }

    fn locate(pin: Pin) -> Option<PinLoc> {
        let loc = map::locate(pin);
        if loc.is_none() {
            log_warn!("pin has no mapping on this board");
        }
        loc
    }
}

impl Board for F7Board {
    fn pin_mode(&mut self, pin: Pin, mode: PinMode) {
        let Some(loc) = Self::locate(pin) else {
            return;
        };
        match mode {
            PinMode::Input => {
                set_moder(loc, MODER_INPUT);
                set_pupdr(loc, PUPDR_NONE);
            }
            PinMode::Output => {
                set_pupdr(loc, PUPDR_NONE);
                set_moder(loc, MODER_OUTPUT);
            }
            PinMode::InputPullUp => {
                set_moder(loc, MODER_INPUT);
                set_pupdr(loc, PUPDR_UP);
            }
        }
    }

    fn digital_write(&mut self, pin: Pin, high: bool) {
        let Some(loc) = Self::locate(pin) else {
            return;
        };
        // Leaving hardware PWM: hand the pin back to the output data register.
        if let Some(ch) = map::pwm_channel(pin) {
            if moder(loc) == MODER_AF {
                self.pwm.set_duty(ch, 0);
                set_moder(loc, MODER_OUTPUT);
            }
        }
        write_level(loc, high);
    }

    fn digital_read(&mut self, pin: Pin) -> bool {
        Self::locate(pin).map_or(false, read_level)
    }

    fn analog_read(&mut self, pin: Pin) -> u16 {
        let (Some(loc), Some(channel)) = (map::locate(pin), map::adc_channel(pin)) else {
            return 0;
        };
        if moder(loc) != MODER_ANALOG {
            set_pupdr(loc, PUPDR_NONE);
            set_moder(loc, MODER_ANALOG);
        }
        self.adc.read(channel)
    }

    fn analog_write(&mut self, pin: Pin, duty: u8) {
        let (Some(loc), Some(ch)) = (map::locate(pin), map::pwm_channel(pin)) else {
            return;
        };
        self.pwm.set_duty(ch, duty);
        if moder(loc) != MODER_AF {
            set_afrh(loc, map::TIM4_AF);
            set_moder(loc, MODER_AF);
        }
    }

    fn millis(&self) -> u32 {
        self.clock.now()
    }

    fn free_ram(&self) -> u32 {
        let heap_start = unsafe { core::ptr::addr_of!(__sheap) as u32 };
        cortex_m::register::msp::read().saturating_sub(heap_start)
    }

    fn release_all(&mut self) {
        for ch in 1..=4 {
            self.pwm.set_duty(ch, 0);
        }
        for pin in map::all() {
            if let Some(loc) = map::locate(pin) {
                set_pupdr(loc, PUPDR_NONE);
                let mode = match pin {
                    Pin::Analog(_) => MODER_ANALOG,
                    Pin::Digital(_) => MODER_INPUT,
                };
                set_moder(loc, mode);
            }
        }
    }
}
