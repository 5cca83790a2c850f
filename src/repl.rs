// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! REPL session.
//!
//! [`Repl`] owns the board, the serial link, the command buffer and the software PWM table, and
//! advances all of them from a single [`Repl::tick`]:
//!
//! 1. software PWM update;
//! 2. buffer fill, as many received bytes as fit (never waits for more);
//! 3. if the front command is complete: dispatch, respond, compact.
//!
//! One tick executes at most one command, so a burst of queued commands is drained over several
//! ticks while PWM keeps being serviced in between.

use embedded_hal::serial::{Read, Write};

use crate::config::{Config, BUFFER_SIZE, MAX_SOFT_PWM};
use crate::dispatch::{self, Outcome};
use crate::error::Error;
use crate::hw::{Board, Link};
use crate::protocol::{CommandBuffer, CommandResult, InfoDescriptor};
use crate::soft_pwm::SoftPwm;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No complete command was buffered.
    Idle,
    /// Executed the command with this opcode and sent a success response.
    Executed(u8),
    /// The command failed; the error sentinel was sent.
    Failed(Error),
    /// RESET was acknowledged and the session re-initialised.
    Restarted,
    /// A stalled partial command of this many bytes was dropped.
    Discarded(usize),
}

/// Serial REPL session with a command buffer of `N` bytes and `M` software PWM channels.
pub struct Repl<B, S, const N: usize = BUFFER_SIZE, const M: usize = MAX_SOFT_PWM> {
    board: B,
    link: Link<S>,
    config: Config,
    buffer: CommandBuffer<N>,
    pwm: SoftPwm<M>,
    /// Time the most recent byte was received.
    last_rx: u32,
}

impl<B, S> Repl<B, S>
where
    B: Board,
    S: Read<u8> + Write<u8>,
{
    /// Session with the default buffer and PWM table sizes.
    pub fn new(board: B, serial: S, config: Config) -> Self {
        Self::with_capacity(board, serial, config)
    }
}

impl<B, S, const N: usize, const M: usize> Repl<B, S, N, M>
where
    B: Board,
    S: Read<u8> + Write<u8>,
{
    pub fn with_capacity(board: B, serial: S, config: Config) -> Self {
        let last_rx = board.millis();
        log_info!("REPL ready: {} ({} byte buffer, {} soft PWM)", config.info, N, M);
        Self {
            board,
            link: Link::new(serial),
            config,
            buffer: CommandBuffer::new(),
            pwm: SoftPwm::new(&config),
            last_rx,
        }
    }

    /// Run one scheduler pass. Never blocks waiting for input.
    pub fn tick(&mut self) -> Tick {
        self.pwm.update(&mut self.board);

        let received = self.fill();
        if !received {
            if let Some(dropped) = self.drop_stalled() {
                return Tick::Discarded(dropped);
            }
        }

        if !self.buffer.has_complete_command() {
            return Tick::Idle;
        }
        let Some(opcode) = self.buffer.opcode() else {
            return Tick::Idle;
        };

        let outcome = dispatch::execute(
            &mut self.board,
            &mut self.pwm,
            &self.config,
            opcode,
            self.buffer.args(),
        );

        let tick = match outcome {
            Ok(Outcome::Reply(result)) => {
                self.send(result);
                Tick::Executed(opcode)
            }
            Ok(Outcome::Info) => {
                self.send_info();
                self.send(CommandResult::Ok);
                Tick::Executed(opcode)
            }
            Ok(Outcome::Restart) => {
                self.send(CommandResult::Ok);
                self.link.flush();
                self.restart();
                return Tick::Restarted;
            }
            Err(e) => {
                log_warn!("command {} failed: {}", opcode, e);
                self.send(CommandResult::Error);
                Tick::Failed(e)
            }
        };
        log_debug!("command {} done", opcode);

        self.buffer.consume();
        tick
    }

    /// Tick forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    /// Move received bytes into the command buffer until it is full or the receiver is empty.
    fn fill(&mut self) -> bool {
        let mut received = false;
        while !self.buffer.is_full() {
            match self.link.try_read() {
                Some(byte) => {
                    self.buffer.push(byte);
                    received = true;
                }
                None => break,
            }
        }
        if received {
            self.last_rx = self.board.millis();
        }
        received
    }

    /// Clear an incomplete command that has seen no new byte for the configured timeout.
    fn drop_stalled(&mut self) -> Option<usize> {
        let timeout = self.config.partial_command_timeout_ms?;
        if self.buffer.is_empty() || self.buffer.has_complete_command() {
            return None;
        }
        if self.board.millis().wrapping_sub(self.last_rx) < timeout {
            return None;
        }

        let dropped = self.buffer.len();
        log_warn!("dropping {} bytes of a stalled command", dropped);
        self.buffer.clear();
        Some(dropped)
    }

    fn send(&mut self, result: CommandResult) {
        let frame = result.frame(self.config.success_code, self.config.error_code);
        self.link.write_bytes(&frame);
    }

    fn send_info(&mut self) {
        let descriptor = InfoDescriptor::new(
            &self.config,
            self.board.millis(),
            self.board.free_ram(),
            N,
            M,
        );
        let link = &mut self.link;
        descriptor.encode(|b| link.write_byte(b));
    }

    /// Start over with an empty buffer, an empty PWM table and every pin released.
    fn restart(&mut self) {
        log_info!("restarting session");
        self.buffer.clear();
        self.pwm = SoftPwm::new(&self.config);
        self.board.release_all();
        self.last_rx = self.board.millis();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn serial(&self) -> &S {
        self.link.inner()
    }

    pub fn serial_mut(&mut self) -> &mut S {
        self.link.inner_mut()
    }

    /// Bytes received but not yet executed.
    pub fn pending(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn pwm(&self) -> &SoftPwm<M> {
        &self.pwm
    }

    /// Tear the session down, handing back the board and the serial port.
    pub fn free(self) -> (B, S) {
        (self.board, self.link.free())
    }
}
