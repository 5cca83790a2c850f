// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin map for the STM32F767ZI Nucleo-144 board.
//!
//! | Protocol pin | MCU pin | Extra |
//! | ------------ | ------- | ----- |
//! | D0 - D11 | PE0 - PE11 | |
//! | D12 - D15 | PD12 - PD15 | TIM4 CH1 - CH4 (AF2) |
//! | A0 - A5 | PC0 - PC5 | ADC1 IN10 - IN15 |
//!
//! USART1 (PA9 TX, PA10 RX, AF7) carries the protocol and is not part of the map.

use super::pins::Pin;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Port {
    C,
    D,
    E,
}

/// Physical location of a protocol pin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PinLoc {
    pub port: Port,
    pub index: u8,
}

/// Number of mapped digital pins.
pub const DIGITAL_PINS: u8 = 16;

/// Number of mapped analog pins.
pub const ANALOG_PINS: u8 = 6;

/// Alternate function connecting PD12..PD15 to TIM4.
pub const TIM4_AF: u32 = 2;

pub fn locate(pin: Pin) -> Option<PinLoc> {
    match pin {
        Pin::Digital(n @ 0..=11) => Some(PinLoc { port: Port::E, index: n }),
        Pin::Digital(n @ 12..=15) => Some(PinLoc { port: Port::D, index: n }),
        Pin::Analog(n @ 0..=5) => Some(PinLoc { port: Port::C, index: n }),
        _ => None,
    }
}

/// ADC1 input channel of an analog pin.
pub fn adc_channel(pin: Pin) -> Option<u8> {
    match pin {
        Pin::Analog(n @ 0..=5) => Some(10 + n),
        _ => None,
    }
}

/// TIM4 output channel (1..=4) of a hardware PWM pin.
pub fn pwm_channel(pin: Pin) -> Option<u8> {
    match pin {
        Pin::Digital(n @ 12..=15) => Some(n - 11),
        _ => None,
    }
}

/// Every mapped pin.
pub fn all() -> impl Iterator<Item = Pin> {
    (0..DIGITAL_PINS)
        .map(Pin::Digital)
        .chain((0..ANALOG_PINS).map(Pin::Analog))
}
