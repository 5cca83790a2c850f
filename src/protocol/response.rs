// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Response encoding.
//!
//! | Result | Frame |
//! | ------ | ----- |
//! | error | `[ERR]` |
//! | success | `[OK]` |
//! | 1-byte value | `[v][OK]` |
//! | 2-byte value | `[lo][hi][OK]` |
//!
//! The sentinels are not escaped. A value byte may equal a sentinel; the host tells them apart by
//! position only.

use heapless::Vec;

use crate::error::Error;

/// Outcome of one dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandResult {
    Error,
    Ok,
    Byte(u8),
    Word(u16),
}

impl CommandResult {
    /// Response frame for this result.
    pub fn frame(self, success_code: u8, error_code: u8) -> Vec<u8, 3> {
        let mut out = Vec::new();
        // At most three bytes, pushes cannot fail.
        match self {
            CommandResult::Error => {
                let _ = out.push(error_code);
                return out;
            }
            CommandResult::Ok => {}
            CommandResult::Byte(v) => {
                let _ = out.push(v);
            }
            CommandResult::Word(v) => {
                let _ = out.extend_from_slice(&v.to_le_bytes());
            }
        }
        let _ = out.push(success_code);
        out
    }

    #[inline]
    pub fn is_error(self) -> bool {
        self == CommandResult::Error
    }
}

impl From<Error> for CommandResult {
    fn from(_: Error) -> Self {
        CommandResult::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK: u8 = 0xFF;
    const ERR: u8 = 0xFE;

    #[test]
    fn error_is_a_single_sentinel() {
        assert_eq!(CommandResult::Error.frame(OK, ERR).as_slice(), &[ERR]);
    }

    #[test]
    fn success_without_output() {
        assert_eq!(CommandResult::Ok.frame(OK, ERR).as_slice(), &[OK]);
    }

    #[test]
    fn one_byte_output_precedes_sentinel() {
        assert_eq!(CommandResult::Byte(1).frame(OK, ERR).as_slice(), &[1, OK]);
    }

    #[test]
    fn two_byte_output_is_little_endian() {
        assert_eq!(
            CommandResult::Word(0x03FF).frame(OK, ERR).as_slice(),
            &[0xFF, 0x03, OK]
        );
    }

    #[test]
    fn every_error_kind_collapses_to_one_result() {
        assert!(CommandResult::from(Error::PwmTableFull).is_error());
        assert!(CommandResult::from(Error::PinOutOfRange(30)).is_error());
        assert!(CommandResult::from(Error::UnknownOpcode(9)).is_error());
    }
}
