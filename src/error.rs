// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command failures.
//!
//! Every variant collapses to the same error sentinel on the wire; the distinction only exists for
//! logging and for tests.

use core::fmt;

/// Result type for command execution.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Raw pin index is not below the configured total pin count.
    PinOutOfRange(u8),
    /// Every software PWM slot is taken by an enabled channel.
    PwmTableFull,
    /// Opcode is not part of the command set.
    UnknownOpcode(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PinOutOfRange(raw) => write!(f, "pin index {} out of range", raw),
            Error::PwmTableFull => write!(f, "software PWM table full"),
            Error::UnknownOpcode(op) => write!(f, "unknown opcode 0x{:02X}", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(Error::PinOutOfRange(40).to_string(), "pin index 40 out of range");
        assert_eq!(Error::UnknownOpcode(0x2A).to_string(), "unknown opcode 0x2A");
        assert_eq!(Error::PwmTableFull.to_string(), "software PWM table full");
    }
}
