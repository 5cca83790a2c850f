// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Firmware configuration.
//!
//! All values are compile-time constants reported to the host through the INFO command. The two
//! table sizes (command buffer and software PWM channels) are const generic parameters of
//! [`Repl`](crate::Repl) instead, since they size fixed arrays.

/// Default command buffer capacity in bytes.
pub const BUFFER_SIZE: usize = 10;

/// Default number of software PWM channels.
pub const MAX_SOFT_PWM: usize = 6;

/// Magic number opening every INFO descriptor.
pub const PROTOCOL_MAGIC: u16 = 0xB416;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Protocol/firmware version.
    pub version: u16,
    /// Human-readable firmware description, at most 255 bytes.
    pub info: &'static str,
    pub baud_rate: u32,
    /// Number of opcodes the firmware understands.
    pub commands_count: u8,
    /// Trailing byte of every successful response.
    pub success_code: u8,
    /// Sole byte of every failed response.
    pub error_code: u8,
    /// Software PWM frequency. The period is `1000 / soft_pwm_freq_hz` whole milliseconds.
    pub soft_pwm_freq_hz: u8,
    /// Total RAM in bytes. Reported saturated to 16 bits.
    pub total_ram: u32,
    pub flash_size: u32,
    pub cpu_freq_hz: u32,
    /// Digital pin numbers driven by a hardware timer instead of the software engine.
    pub hardware_pwm_pins: &'static [u8],
    /// Raw pin indices below this value are digital pins.
    pub digital_pins: u8,
    /// Raw pin indices from `digital_pins` up to this value are analog pins.
    pub total_pins: u8,
    /// Drop a partially received command after this much silence. `None` keeps waiting forever.
    pub partial_command_timeout_ms: Option<u32>,
}

impl Config {
    /// ATmega328P-class board; the reference profile of the protocol.
    pub const ARDUINO_UNO: Self = Self {
        version: 1,
        info: "Arduino REPL v1.0",
        baud_rate: 115_200,
        commands_count: 8,
        success_code: 0xFF,
        error_code: 0xFE,
        soft_pwm_freq_hz: 50,
        total_ram: 2048,
        flash_size: 32_256,
        cpu_freq_hz: 16_000_000,
        hardware_pwm_pins: &[3, 5, 6, 9, 10, 11],
        digital_pins: 14,
        total_pins: 22,
        partial_command_timeout_ms: None,
    };

    /// STM32F767ZI running from the 16 MHz HSI (`hw::f767` board support).
    pub const NUCLEO_F767ZI: Self = Self {
        version: 1,
        info: "STM32F767 REPL v1.0",
        baud_rate: 115_200,
        commands_count: 8,
        success_code: 0xFF,
        error_code: 0xFE,
        soft_pwm_freq_hz: 50,
        total_ram: 512 * 1024,
        flash_size: 2048 * 1024,
        cpu_freq_hz: 16_000_000,
        hardware_pwm_pins: &[12, 13, 14, 15],
        digital_pins: 16,
        total_pins: 22,
        partial_command_timeout_ms: None,
    };

    /// Software PWM period in milliseconds.
    #[inline]
    pub const fn soft_pwm_period_ms(&self) -> u32 {
        if self.soft_pwm_freq_hz == 0 {
            return 1000;
        }
        1000 / self.soft_pwm_freq_hz as u32
    }

    /// Whether `digital_pin` has a hardware PWM channel.
    pub fn is_hardware_pwm(&self, digital_pin: u8) -> bool {
        self.hardware_pwm_pins.contains(&digital_pin)
    }

    /// Checks the invariants the INFO encoder and pin translator rely on.
    pub const fn is_valid(&self) -> bool {
        self.digital_pins <= self.total_pins
            && self.hardware_pwm_pins.len() <= u8::MAX as usize
            && self.info.len() <= u8::MAX as usize
            && self.success_code != self.error_code
            && self.soft_pwm_freq_hz > 0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::ARDUINO_UNO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_is_whole_milliseconds() {
        assert_eq!(Config::ARDUINO_UNO.soft_pwm_period_ms(), 20);

        let odd = Config {
            soft_pwm_freq_hz: 60,
            ..Config::ARDUINO_UNO
        };
        assert_eq!(odd.soft_pwm_period_ms(), 16);
    }

    #[test]
    fn profiles_are_valid() {
        assert!(Config::ARDUINO_UNO.is_valid());
        assert!(Config::NUCLEO_F767ZI.is_valid());

        let clash = Config {
            error_code: 0xFF,
            ..Config::ARDUINO_UNO
        };
        assert!(!clash.is_valid());
    }

    #[test]
    fn hardware_pwm_lookup() {
        let cfg = Config::ARDUINO_UNO;
        assert!(cfg.is_hardware_pwm(9));
        assert!(!cfg.is_hardware_pwm(13));
    }
}
