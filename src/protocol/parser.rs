// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command buffer for the REPL protocol.
//!
//! Incoming bytes accumulate in a fixed-capacity buffer. Byte 0 is always the opcode of the oldest
//! unprocessed command. Once the opcode and all of its arguments are present the command is
//! complete; after it has been executed, [`CommandBuffer::consume`] shifts the remaining bytes to
//! the front.
//!
//! A sender that stops halfway through a command leaves it in the buffer for good. The buffer
//! never times out on its own, see `Config::partial_command_timeout_ms`.

use heapless::Vec;

use crate::protocol::messages::required_args;

pub struct CommandBuffer<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> CommandBuffer<N> {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append a received byte. Returns `false` (and drops nothing) if the buffer is full.
    #[inline]
    pub fn push(&mut self, byte: u8) -> bool {
        self.bytes.push(byte).is_ok()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Opcode of the oldest buffered command.
    pub fn opcode(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Length of the command at the front, opcode included.
    pub fn command_len(&self) -> Option<usize> {
        self.opcode().map(|op| 1 + required_args(op))
    }

    /// True once the opcode and all of its arguments have arrived.
    pub fn has_complete_command(&self) -> bool {
        match self.opcode() {
            Some(op) => self.bytes.len() > required_args(op),
            None => false,
        }
    }

    /// Argument bytes of the command at the front. Shorter than required while incomplete.
    pub fn args(&self) -> &[u8] {
        let end = self.command_len().unwrap_or(0).min(self.bytes.len());
        self.bytes.get(1..end).unwrap_or(&[])
    }

    /// Remove the command at the front and shift the remaining bytes left.
    ///
    /// Returns the number of bytes removed.
    pub fn consume(&mut self) -> usize {
        let len = self.bytes.len();
        let taken = self.command_len().unwrap_or(0).min(len);
        self.bytes.copy_within(taken..len, 0);
        self.bytes.truncate(len - taken);
        taken
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl<const N: usize> Default for CommandBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::*;

    fn buffer_with(bytes: &[u8]) -> CommandBuffer<10> {
        let mut buf = CommandBuffer::new();
        for &b in bytes {
            assert!(buf.push(b));
        }
        buf
    }

    #[test]
    fn empty_buffer_is_never_complete() {
        let buf = CommandBuffer::<10>::new();
        assert!(!buf.has_complete_command());
        assert_eq!(buf.opcode(), None);
        assert!(buf.args().is_empty());
    }

    #[test]
    fn zero_argument_opcodes_complete_immediately() {
        for op in [CMD_NOP, CMD_INFO, CMD_RESET, 0x42] {
            assert!(buffer_with(&[op]).has_complete_command());
        }
    }

    #[test]
    fn commands_complete_after_all_arguments() {
        for op in [CMD_DIGITALWRITE, CMD_ANALOGWRITE, CMD_PINMODE] {
            assert!(!buffer_with(&[op]).has_complete_command());
            assert!(!buffer_with(&[op, 3]).has_complete_command());
            assert!(buffer_with(&[op, 3, 1]).has_complete_command());
        }
        for op in [CMD_DIGITALREAD, CMD_ANALOGREAD] {
            assert!(!buffer_with(&[op]).has_complete_command());
            assert!(buffer_with(&[op, 3]).has_complete_command());
        }
    }

    #[test]
    fn args_cover_only_the_front_command() {
        let buf = buffer_with(&[CMD_DIGITALWRITE, 13, 1, CMD_NOP]);
        assert_eq!(buf.args(), &[13, 1]);

        let partial = buffer_with(&[CMD_PINMODE, 4]);
        assert_eq!(partial.args(), &[4]);
    }

    #[test]
    fn consume_removes_exactly_one_command() {
        let mut buf = buffer_with(&[CMD_ANALOGWRITE, 9, 128, CMD_DIGITALREAD, 2, CMD_NOP]);
        assert_eq!(buf.consume(), 3);
        assert_eq!(buf.as_slice(), &[CMD_DIGITALREAD, 2, CMD_NOP]);
        assert_eq!(buf.consume(), 2);
        assert_eq!(buf.as_slice(), &[CMD_NOP]);
        assert_eq!(buf.consume(), 1);
        assert!(buf.is_empty());
    }

    #[test]
    fn consume_keeps_trailing_partial_command() {
        let mut buf = buffer_with(&[CMD_NOP, CMD_DIGITALWRITE, 7]);
        buf.consume();
        assert_eq!(buf.as_slice(), &[CMD_DIGITALWRITE, 7]);
        assert!(!buf.has_complete_command());
    }

    #[test]
    fn full_buffer_refuses_bytes() {
        let mut buf = CommandBuffer::<3>::new();
        assert!(buf.push(1));
        assert!(buf.push(2));
        assert!(buf.push(3));
        assert!(buf.is_full());
        assert!(!buf.push(4));
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }
}
