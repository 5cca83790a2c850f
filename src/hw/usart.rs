// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial link abstraction layer.
//!
//! Wraps any `embedded-hal` 0.2 serial port (the STM32 HAL `Serial`, or a mock in tests) with the
//! byte-level helpers the protocol needs:
//!
//! - reads never block: [`Link::try_read`] returns `None` as soon as the receiver is empty;
//! - writes block until the byte is accepted by the transmitter.
//!
//! To talk to the board from the host, connect to the USART at the configured baud rate with any
//! raw serial tool, e.g.
//! ```text
//! $ picocom -b 115200 --imap 8bithex /dev/tty.usbmodem*
//! ```

use embedded_hal::serial::{Read, Write};
use nb::block;

pub struct Link<S> {
    serial: S,
}

impl<S> Link<S>
where
    S: Read<u8> + Write<u8>,
{
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    /// Take one received byte if there is one.
    ///
    /// A receive error (overrun, framing, noise) ends the read with `None`. Whatever the peripheral
    /// lost with it is gone; later bytes are still delivered.
    pub fn try_read(&mut self) -> Option<u8> {
        match self.serial.read() {
            Ok(byte) => Some(byte),
            Err(nb::Error::WouldBlock) => None,
            Err(nb::Error::Other(_)) => {
                log_warn!("serial receive error");
                None
            }
        }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.serial.write(b));
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    /// Block until the transmitter has drained.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.serial.flush());
    }

    pub fn inner(&self) -> &S {
        &self.serial
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    pub fn free(self) -> S {
        self.serial
    }
}
