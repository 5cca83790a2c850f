// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Mock board and serial port for host tests.
//!
//! `MockBoard` records every pin operation and lets tests move the clock by hand. `MockSerial`
//! keeps received and transmitted bytes in memory.

use core::convert::Infallible;
use std::collections::{HashMap, VecDeque};

use embedded_hal::serial::{Read, Write};

use super::board::Board;
use super::pins::{Pin, PinMode};

/// One recorded board operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Mode(Pin, PinMode),
    Write(Pin, bool),
    Hardware(Pin, u8),
    Release,
}

#[derive(Debug, Default)]
pub struct MockBoard {
    now: u32,
    free_ram: u32,
    events: Vec<Event>,
    levels: HashMap<Pin, bool>,
    inputs: HashMap<Pin, bool>,
    analog: HashMap<Pin, u16>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            free_ram: 1024,
            ..Default::default()
        }
    }

    pub fn set_time(&mut self, ms: u32) {
        self.now = ms;
    }

    /// Level seen by `digital_read`, overriding the last written level.
    pub fn set_input(&mut self, pin: Pin, high: bool) {
        self.inputs.insert(pin, high);
    }

    pub fn set_analog(&mut self, pin: Pin, value: u16) {
        self.analog.insert(pin, value);
    }

    /// Last level written to `pin` (low if never written).
    pub fn level(&self, pin: Pin) -> bool {
        self.levels.get(&pin).copied().unwrap_or(false)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Levels written to `pin`, in order.
    pub fn writes_to(&self, pin: Pin) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                Event::Write(p, high) if p == pin => Some(high),
                _ => None,
            })
            .collect()
    }
}

impl Board for MockBoard {
    fn pin_mode(&mut self, pin: Pin, mode: PinMode) {
        self.events.push(Event::Mode(pin, mode));
    }

    fn digital_write(&mut self, pin: Pin, high: bool) {
        self.events.push(Event::Write(pin, high));
        self.levels.insert(pin, high);
    }

    fn digital_read(&mut self, pin: Pin) -> bool {
        self.inputs
            .get(&pin)
            .copied()
            .unwrap_or_else(|| self.level(pin))
    }

    fn analog_read(&mut self, pin: Pin) -> u16 {
        self.analog.get(&pin).copied().unwrap_or(0)
    }

    fn analog_write(&mut self, pin: Pin, duty: u8) {
        self.events.push(Event::Hardware(pin, duty));
    }

    fn millis(&self) -> u32 {
        self.now
    }

    fn free_ram(&self) -> u32 {
        self.free_ram
    }

    fn release_all(&mut self) {
        self.events.push(Event::Release);
        self.levels.clear();
    }
}

#[derive(Debug)]
pub struct MockSerialError;

#[derive(Debug, Default)]
pub struct MockSerial {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    flushed: usize,
    fail_read: bool,
}

impl MockSerial {
    pub fn with_rx(bytes: &[u8]) -> Self {
        let mut serial = Self::default();
        serial.push_rx(bytes);
        serial
    }

    /// Queue bytes as if the host had sent them.
    pub fn push_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Make the next `read` report a receive error.
    pub fn fail_next_read(&mut self) {
        self.fail_read = true;
    }

    pub fn pending_rx(&self) -> usize {
        self.rx.len()
    }

    pub fn tx(&self) -> &[u8] {
        &self.tx
    }

    /// Number of transmitted bytes covered by the most recent flush.
    pub fn flushed(&self) -> usize {
        self.flushed
    }

    pub fn take_tx(&mut self) -> Vec<u8> {
        self.flushed = 0;
        core::mem::take(&mut self.tx)
    }
}

impl Read<u8> for MockSerial {
    type Error = MockSerialError;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        if self.fail_read {
            self.fail_read = false;
            return Err(nb::Error::Other(MockSerialError));
        }
        self.rx.pop_front().ok_or(nb::Error::WouldBlock)
    }
}

impl Write<u8> for MockSerial {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.tx.push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.flushed = self.tx.len();
        Ok(())
    }
}
