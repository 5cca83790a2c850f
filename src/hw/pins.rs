// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin identifiers and raw index translation.
//!
//! The protocol addresses pins with a single raw byte. Digital pins come first, analog pins follow
//! immediately after the last digital one:
//!
//! ```text
//! raw:  0 .. digital_pins-1 | digital_pins .. total_pins-1 | total_pins ..
//! pin:  Digital(0..)        | Analog(0..)                  | out of range
//! ```

use crate::config::Config;
use crate::error::{Error, Result};

/// A physical pin, as seen by the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pin {
    Digital(u8),
    Analog(u8),
}

impl Pin {
    /// Map a raw protocol pin index to a pin.
    ///
    /// # Errors
    ///
    /// Returns `Error::PinOutOfRange` if `raw >= config.total_pins`.
    pub fn translate(raw: u8, config: &Config) -> Result<Self> {
        if raw < config.digital_pins {
            Ok(Pin::Digital(raw))
        } else if raw < config.total_pins {
            Ok(Pin::Analog(raw - config.digital_pins))
        } else {
            Err(Error::PinOutOfRange(raw))
        }
    }

    /// Inverse of [`Pin::translate`].
    pub fn raw(self, config: &Config) -> u8 {
        match self {
            Pin::Digital(n) => n,
            Pin::Analog(n) => config.digital_pins.saturating_add(n),
        }
    }

    /// Whether this pin is driven by a hardware PWM channel.
    pub fn has_hardware_pwm(self, hardware_pwm_pins: &[u8]) -> bool {
        match self {
            Pin::Digital(n) => hardware_pwm_pins.contains(&n),
            Pin::Analog(_) => false,
        }
    }
}

/// Pin direction and pull configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Input,
    Output,
    InputPullUp,
}

impl PinMode {
    /// Decode the PINMODE argument: 0 is input, 2 is input with pull-up, anything else is output.
    pub fn from_wire(byte: u8) -> Self {
        match byte {
            0 => PinMode::Input,
            2 => PinMode::InputPullUp,
            _ => PinMode::Output,
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            PinMode::Input => 0,
            PinMode::Output => 1,
            PinMode::InputPullUp => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digital_range_maps_directly() {
        let cfg = Config::ARDUINO_UNO;
        assert_eq!(Pin::translate(0, &cfg), Ok(Pin::Digital(0)));
        assert_eq!(Pin::translate(13, &cfg), Ok(Pin::Digital(13)));
    }

    #[test]
    fn analog_range_is_offset_by_digital_count() {
        let cfg = Config::ARDUINO_UNO;
        assert_eq!(Pin::translate(14, &cfg), Ok(Pin::Analog(0)));
        assert_eq!(Pin::translate(21, &cfg), Ok(Pin::Analog(7)));
    }

    #[test]
    fn out_of_range_fails() {
        let cfg = Config::ARDUINO_UNO;
        assert_eq!(Pin::translate(22, &cfg), Err(Error::PinOutOfRange(22)));
        assert_eq!(Pin::translate(255, &cfg), Err(Error::PinOutOfRange(255)));
    }

    #[test]
    fn raw_inverts_translate() {
        let cfg = Config::NUCLEO_F767ZI;
        for raw in 0..cfg.total_pins {
            let pin = Pin::translate(raw, &cfg).unwrap();
            assert_eq!(pin.raw(&cfg), raw);
        }
    }

    #[test]
    fn analog_pins_never_have_hardware_pwm() {
        let hw = [3, 5];
        assert!(Pin::Digital(3).has_hardware_pwm(&hw));
        assert!(!Pin::Digital(4).has_hardware_pwm(&hw));
        assert!(!Pin::Analog(3).has_hardware_pwm(&hw));
    }

    #[test]
    fn pin_mode_wire_values() {
        assert_eq!(PinMode::from_wire(0), PinMode::Input);
        assert_eq!(PinMode::from_wire(1), PinMode::Output);
        assert_eq!(PinMode::from_wire(2), PinMode::InputPullUp);
        assert_eq!(PinMode::from_wire(9), PinMode::Output);
        assert_eq!(PinMode::InputPullUp.to_wire(), 2);
    }
}
