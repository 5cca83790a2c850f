// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Layer
//!
//! - [`board`] - `Board` trait: the pin and clock primitives the REPL runs on.
//! - [`pins`] - Pin identifiers, pin modes and raw index translation.
//! - [`usart`] - Byte-level serial link over any `embedded-hal` serial port.
//!
//! With the `firmware` feature, the STM32F767 implementation is available as well:
//!
//! - `f767` - `Board` implementation over GPIO, ADC1, TIM2 and TIM4.
//! - `adc`, `clock`, `pwm` - ADC1 conversions, TIM2 millisecond counter, TIM4 PWM.
//! - `pins_f767zi` - Protocol pin numbers to MCU pins.

pub mod board;
pub mod pins;
pub mod usart;

#[cfg(feature = "firmware")]
pub mod adc;
#[cfg(feature = "firmware")]
pub mod clock;
#[cfg(feature = "firmware")]
pub mod f767;
#[cfg(feature = "firmware")]
pub mod pins_f767zi;
#[cfg(feature = "firmware")]
pub mod pwm;

#[cfg(test)]
pub mod mock;

pub use board::Board;
pub use pins::{Pin, PinMode};
pub use usart::Link;
