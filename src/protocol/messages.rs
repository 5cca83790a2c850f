// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Opcodes of the REPL protocol.
//!
//! Request frame: `[opcode][arg0]?[arg1]?`, with the argument count fixed per opcode.

// Opcodes
pub const CMD_NOP: u8 = 0x00;
pub const CMD_INFO: u8 = 0x01;
pub const CMD_DIGITALREAD: u8 = 0x02;
pub const CMD_DIGITALWRITE: u8 = 0x03;
pub const CMD_ANALOGREAD: u8 = 0x04;
pub const CMD_ANALOGWRITE: u8 = 0x05;
pub const CMD_PINMODE: u8 = 0x06;
pub const CMD_RESET: u8 = 0x07;

/// Commands understood by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Opcode {
    Nop,
    Info,
    DigitalRead,
    DigitalWrite,
    AnalogRead,
    AnalogWrite,
    PinMode,
    Reset,
}

impl Opcode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_NOP => Some(Opcode::Nop),
            CMD_INFO => Some(Opcode::Info),
            CMD_DIGITALREAD => Some(Opcode::DigitalRead),
            CMD_DIGITALWRITE => Some(Opcode::DigitalWrite),
            CMD_ANALOGREAD => Some(Opcode::AnalogRead),
            CMD_ANALOGWRITE => Some(Opcode::AnalogWrite),
            CMD_PINMODE => Some(Opcode::PinMode),
            CMD_RESET => Some(Opcode::Reset),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Opcode::Nop => CMD_NOP,
            Opcode::Info => CMD_INFO,
            Opcode::DigitalRead => CMD_DIGITALREAD,
            Opcode::DigitalWrite => CMD_DIGITALWRITE,
            Opcode::AnalogRead => CMD_ANALOGREAD,
            Opcode::AnalogWrite => CMD_ANALOGWRITE,
            Opcode::PinMode => CMD_PINMODE,
            Opcode::Reset => CMD_RESET,
        }
    }

    /// Number of argument bytes following the opcode.
    pub fn arg_count(self) -> usize {
        match self {
            Opcode::Nop | Opcode::Info | Opcode::Reset => 0,
            Opcode::DigitalRead | Opcode::AnalogRead => 1,
            Opcode::DigitalWrite | Opcode::AnalogWrite | Opcode::PinMode => 2,
        }
    }
}

/// Number of argument bytes `opcode` needs. Unknown opcodes need none.
pub fn required_args(opcode: u8) -> usize {
    Opcode::from_byte(opcode).map_or(0, Opcode::arg_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_counts() {
        assert_eq!(required_args(CMD_NOP), 0);
        assert_eq!(required_args(CMD_INFO), 0);
        assert_eq!(required_args(CMD_RESET), 0);
        assert_eq!(required_args(CMD_DIGITALREAD), 1);
        assert_eq!(required_args(CMD_ANALOGREAD), 1);
        assert_eq!(required_args(CMD_DIGITALWRITE), 2);
        assert_eq!(required_args(CMD_ANALOGWRITE), 2);
        assert_eq!(required_args(CMD_PINMODE), 2);
    }

    #[test]
    fn unknown_opcodes_take_no_arguments() {
        assert_eq!(Opcode::from_byte(0x08), None);
        assert_eq!(required_args(0x08), 0);
        assert_eq!(required_args(0xFF), 0);
    }

    #[test]
    fn byte_mapping_is_consistent() {
        for byte in 0..=CMD_RESET {
            let op = Opcode::from_byte(byte).unwrap();
            assert_eq!(op.to_byte(), byte);
        }
    }
}
