// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board abstraction.
//!
//! The REPL never touches registers. Everything it needs from the MCU goes through this trait, so
//! the same session code runs on the STM32F767 and against the mocks in the test suite.

use super::pins::{Pin, PinMode};

/// Pin and clock primitives of a board.
///
/// All methods are expected to complete immediately. None of them may block on I/O.
pub trait Board {
    /// Configure direction and pull of a pin.
    fn pin_mode(&mut self, pin: Pin, mode: PinMode);

    /// Drive a pin high or low. A pin currently driven by hardware PWM returns to plain output.
    fn digital_write(&mut self, pin: Pin, high: bool);

    /// Sample the logic level of a pin.
    fn digital_read(&mut self, pin: Pin) -> bool;

    /// Single analog conversion.
    fn analog_read(&mut self, pin: Pin) -> u16;

    /// Hardware PWM output, `duty` out of 255.
    ///
    /// Only called for pins listed in `Config::hardware_pwm_pins`.
    fn analog_write(&mut self, pin: Pin, duty: u8);

    /// Milliseconds since boot, wrapping at `u32::MAX`.
    fn millis(&self) -> u32;

    /// Estimate of unused RAM in bytes.
    fn free_ram(&self) -> u32;

    /// Return every pin to its reset state.
    fn release_all(&mut self);
}
