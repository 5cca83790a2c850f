// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! INFO descriptor.
//!
//! Streamed in reply to the INFO command, before the usual success sentinel. All multi-byte fields
//! are little-endian:
//!
//! | Offset | Width | Field |
//! | ------ | ----- | ----- |
//! | 0 | u16 | magic `0xB416` |
//! | 2 | u16 | version |
//! | 4 | u32 | uptime (ms) |
//! | 8 | u16 | free RAM (bytes, saturating) |
//! | 10 | u16 | total RAM (bytes, saturating) |
//! | 12 | u32 | flash size |
//! | 16 | u32 | CPU frequency (Hz) |
//! | 20 | u8 | command buffer size |
//! | 21 | u8 | digital pin count |
//! | 22 | u8 | total pin count |
//! | 23 | u8 | software PWM channels |
//! | 24 | u8 | software PWM frequency (Hz) |
//! | 25 | u8 | command count |
//! | 26 | u8 | success sentinel |
//! | 27 | u8 | error sentinel |
//! | 28 | u8 | hardware PWM pin count `K` |
//! | 29 | K | hardware PWM pins |
//! | 29+K | u8 | info string length `L` |
//! | 30+K | L | info string |

use core::fmt;

use crate::config::{Config, PROTOCOL_MAGIC};

/// Length of the fixed-width part, up to and including the error sentinel.
pub const FIXED_LEN: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoDescriptor<'a> {
    pub magic: u16,
    pub version: u16,
    pub uptime_ms: u32,
    pub free_ram: u16,
    pub total_ram: u16,
    pub flash_size: u32,
    pub cpu_freq_hz: u32,
    pub buffer_size: u8,
    pub digital_pins: u8,
    pub total_pins: u8,
    pub max_soft_pwm: u8,
    pub soft_pwm_freq_hz: u8,
    pub commands_count: u8,
    pub success_code: u8,
    pub error_code: u8,
    pub hardware_pwm_pins: &'a [u8],
    pub info: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Fewer bytes than the layout requires.
    Truncated,
    /// First field is not the protocol magic.
    BadMagic(u16),
    /// Info string is not valid UTF-8.
    InvalidText,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated => write!(f, "descriptor truncated"),
            DecodeError::BadMagic(m) => write!(f, "bad descriptor magic 0x{:04X}", m),
            DecodeError::InvalidText => write!(f, "info string is not UTF-8"),
        }
    }
}

fn saturate_u16(n: u32) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn saturate_u8(n: usize) -> u8 {
    u8::try_from(n).unwrap_or(u8::MAX)
}

/// Longest prefix of `s` that fits a length byte and ends on a char boundary.
fn clip_text(s: &str) -> &str {
    let mut end = s.len().min(usize::from(u8::MAX));
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.get(..end).unwrap_or("")
}

impl<'a> InfoDescriptor<'a> {
    /// Build the descriptor of a running session.
    pub fn new(
        config: &'a Config,
        uptime_ms: u32,
        free_ram: u32,
        buffer_size: usize,
        max_soft_pwm: usize,
    ) -> Self {
        let pins = config.hardware_pwm_pins;
        Self {
            magic: PROTOCOL_MAGIC,
            version: config.version,
            uptime_ms,
            free_ram: saturate_u16(free_ram),
            total_ram: saturate_u16(config.total_ram),
            flash_size: config.flash_size,
            cpu_freq_hz: config.cpu_freq_hz,
            buffer_size: saturate_u8(buffer_size),
            digital_pins: config.digital_pins,
            total_pins: config.total_pins,
            max_soft_pwm: saturate_u8(max_soft_pwm),
            soft_pwm_freq_hz: config.soft_pwm_freq_hz,
            commands_count: config.commands_count,
            success_code: config.success_code,
            error_code: config.error_code,
            hardware_pwm_pins: pins.get(..usize::from(u8::MAX)).unwrap_or(pins),
            info: clip_text(config.info),
        }
    }

    /// Number of bytes [`InfoDescriptor::encode`] emits.
    pub fn encoded_len(&self) -> usize {
        FIXED_LEN + 1 + self.hardware_pwm_pins.len() + 1 + self.info.len()
    }

    /// Emit the descriptor one byte at a time.
    pub fn encode(&self, mut put: impl FnMut(u8)) {
        let mut put_all = |bytes: &[u8]| bytes.iter().for_each(|&b| put(b));

        put_all(&self.magic.to_le_bytes());
        put_all(&self.version.to_le_bytes());
        put_all(&self.uptime_ms.to_le_bytes());
        put_all(&self.free_ram.to_le_bytes());
        put_all(&self.total_ram.to_le_bytes());
        put_all(&self.flash_size.to_le_bytes());
        put_all(&self.cpu_freq_hz.to_le_bytes());
        put_all(&[
            self.buffer_size,
            self.digital_pins,
            self.total_pins,
            self.max_soft_pwm,
            self.soft_pwm_freq_hz,
            self.commands_count,
            self.success_code,
            self.error_code,
        ]);

        put_all(&[saturate_u8(self.hardware_pwm_pins.len())]);
        put_all(self.hardware_pwm_pins);

        put_all(&[saturate_u8(self.info.len())]);
        put_all(self.info.as_bytes());
    }

    /// Parse a descriptor from the start of `bytes`.
    ///
    /// Returns the descriptor and the number of bytes it occupied.
    ///
    /// # Errors
    ///
    /// See [`DecodeError`].
    pub fn decode(bytes: &'a [u8]) -> Result<(Self, usize), DecodeError> {
        let mut r = Reader { bytes, pos: 0 };

        let magic = r.u16()?;
        if magic != PROTOCOL_MAGIC {
            return Err(DecodeError::BadMagic(magic));
        }

        let version = r.u16()?;
        let uptime_ms = r.u32()?;
        let free_ram = r.u16()?;
        let total_ram = r.u16()?;
        let flash_size = r.u32()?;
        let cpu_freq_hz = r.u32()?;
        let buffer_size = r.u8()?;
        let digital_pins = r.u8()?;
        let total_pins = r.u8()?;
        let max_soft_pwm = r.u8()?;
        let soft_pwm_freq_hz = r.u8()?;
        let commands_count = r.u8()?;
        let success_code = r.u8()?;
        let error_code = r.u8()?;

        let pin_count = r.u8()?;
        let hardware_pwm_pins = r.take(usize::from(pin_count))?;

        let info_len = r.u8()?;
        let info = core::str::from_utf8(r.take(usize::from(info_len))?)
            .map_err(|_| DecodeError::InvalidText)?;

        let descriptor = Self {
            magic,
            version,
            uptime_ms,
            free_ram,
            total_ram,
            flash_size,
            cpu_freq_hz,
            buffer_size,
            digital_pins,
            total_pins,
            max_soft_pwm,
            soft_pwm_freq_hz,
            commands_count,
            success_code,
            error_code,
            hardware_pwm_pins,
            info,
        };
        Ok((descriptor, r.pos))
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(n).ok_or(DecodeError::Truncated)?;
        let out = self.bytes.get(self.pos..end).ok_or(DecodeError::Truncated)?;
        self.pos = end;
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}
