// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command execution.
//!
//! Maps one complete command (opcode plus arguments) to board operations and a result. Writing the
//! response is left to the caller: INFO streams a descriptor and RESET has to flush before the
//! session restarts, so neither fits a plain [`CommandResult`].

use crate::config::Config;
use crate::error::{Error, Result};
use crate::hw::{Board, Pin, PinMode};
use crate::protocol::{CommandResult, Opcode};
use crate::soft_pwm::SoftPwm;

/// What the caller still has to do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Send this result.
    Reply(CommandResult),
    /// Send the INFO descriptor, then the success sentinel.
    Info,
    /// Send the success sentinel, flush, then re-initialise the session.
    Restart,
}

fn arg(args: &[u8], i: usize) -> u8 {
    args.get(i).copied().unwrap_or(0)
}

/// Execute `opcode` with its argument bytes.
///
/// `args` holds exactly the bytes `required_args(opcode)` asks for.
///
/// # Errors
///
/// - `Error::UnknownOpcode` for bytes outside the command set.
/// - `Error::PinOutOfRange` if the pin argument does not name a pin of `config`.
/// - `Error::PwmTableFull` from ANALOGWRITE when no software PWM slot is free.
pub fn execute<B: Board, const M: usize>(
    board: &mut B,
    pwm: &mut SoftPwm<M>,
    config: &Config,
    opcode: u8,
    args: &[u8],
) -> Result<Outcome> {
    let op = Opcode::from_byte(opcode).ok_or(Error::UnknownOpcode(opcode))?;

    let outcome = match op {
        Opcode::Nop => Outcome::Reply(CommandResult::Ok),
        Opcode::Info => Outcome::Info,
        Opcode::Reset => Outcome::Restart,
        Opcode::DigitalRead => {
            let pin = Pin::translate(arg(args, 0), config)?;
            let level = board.digital_read(pin);
            Outcome::Reply(CommandResult::Byte(u8::from(level)))
        }
        Opcode::DigitalWrite => {
            let pin = Pin::translate(arg(args, 0), config)?;
            pwm.reset_pwm(pin);
            board.digital_write(pin, arg(args, 1) != 0);
            Outcome::Reply(CommandResult::Ok)
        }
        Opcode::AnalogRead => {
            let pin = Pin::translate(arg(args, 0), config)?;
            Outcome::Reply(CommandResult::Word(board.analog_read(pin)))
        }
        Opcode::AnalogWrite => {
            let pin = Pin::translate(arg(args, 0), config)?;
            pwm.set_pwm(board, pin, arg(args, 1))?;
            Outcome::Reply(CommandResult::Ok)
        }
        Opcode::PinMode => {
            let pin = Pin::translate(arg(args, 0), config)?;
            board.pin_mode(pin, PinMode::from_wire(arg(args, 1)));
            Outcome::Reply(CommandResult::Ok)
        }
    };
    Ok(outcome)
}
