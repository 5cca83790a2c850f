// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Software PWM for pins without a hardware timer channel.
//!
//! Each channel is a two-state machine advanced once per scheduler tick:
//!
//! ```text
//!           elapsed >= period          (last_toggle = now)
//!   LOW  ---------------------------------------------------->  HIGH
//!   LOW  <----------------------------------------------------  HIGH
//!           elapsed >= period * duty / 255   (last_toggle kept)
//! ```
//!
//! `elapsed` is always measured from `last_toggle`, which only moves on the rising edge. The high
//! phase therefore ends `on_time` after the rising edge and the next rising edge comes `period`
//! after the previous one, however late the falling edge was serviced. A late tick on the rising
//! edge shifts every following edge by the same amount.
//!
//! Channels live in a fixed table. Disabled slots are reused in place before the table grows; the
//! table is never compacted.

use heapless::Vec;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::hw::{Board, Pin};

/// One software-timed pin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    pub pin: Pin,
    pub duty_cycle: u8,
    /// Timestamp of the last rising edge (or of the assignment).
    pub last_toggle: u32,
    /// Currently driving high.
    pub state: bool,
    pub enabled: bool,
}

pub struct SoftPwm<const M: usize> {
    channels: Vec<Channel, M>,
    period_ms: u32,
    hardware_pins: &'static [u8],
}

impl<const M: usize> SoftPwm<M> {
    pub fn new(config: &Config) -> Self {
        Self {
            channels: Vec::new(),
            period_ms: config.soft_pwm_period_ms(),
            hardware_pins: config.hardware_pwm_pins,
        }
    }

    /// Set the duty cycle of `pin`.
    ///
    /// Hardware PWM pins go straight to the board and never occupy a slot. Any other pin is driven
    /// low first, then gets (or keeps) a slot in the channel table. A duty of 0 disables the pin's
    /// channel.
    ///
    /// # Errors
    ///
    /// Returns `Error::PwmTableFull` if the pin has no channel yet and no slot is free.
    pub fn set_pwm<B: Board>(&mut self, board: &mut B, pin: Pin, duty: u8) -> Result<()> {
        if pin.has_hardware_pwm(self.hardware_pins) {
            board.analog_write(pin, duty);
            return Ok(());
        }

        board.digital_write(pin, false);

        let index = self
            .channels
            .iter()
            .position(|c| c.enabled && c.pin == pin)
            .or_else(|| self.channels.iter().position(|c| !c.enabled))
            .unwrap_or(self.channels.len());
        if index >= M {
            log_warn!("soft PWM table full ({} channels)", M);
            return Err(Error::PwmTableFull);
        }

        if duty == 0 {
            if let Some(slot) = self.channels.get_mut(index) {
                slot.enabled = false;
            }
            return Ok(());
        }

        let channel = Channel {
            pin,
            duty_cycle: duty,
            last_toggle: board.millis(),
            state: false,
            enabled: true,
        };
        match self.channels.get_mut(index) {
            Some(slot) => *slot = channel,
            None => self
                .channels
                .push(channel)
                .map_err(|_| Error::PwmTableFull)?,
        }
        log_debug!("soft PWM slot {} duty {}", index, duty);
        Ok(())
    }

    /// Stop the software channel of `pin`, if it has one. The pin keeps its current level.
    pub fn reset_pwm(&mut self, pin: Pin) {
        if let Some(slot) = self
            .channels
            .iter_mut()
            .find(|c| c.enabled && c.pin == pin)
        {
            slot.enabled = false;
        }
    }

    /// Advance every enabled channel to the board's current time.
    pub fn update<B: Board>(&mut self, board: &mut B) {
        let now = board.millis();
        let period = self.period_ms;

        for ch in self.channels.iter_mut().filter(|c| c.enabled) {
            let on_time = period * u32::from(ch.duty_cycle) / 255;
            let elapsed = now.wrapping_sub(ch.last_toggle);

            if ch.state && elapsed >= on_time {
                board.digital_write(ch.pin, false);
                ch.state = false;
            } else if !ch.state && elapsed >= period {
                board.digital_write(ch.pin, true);
                ch.state = true;
                ch.last_toggle = now;
            }
        }
    }

    /// Every slot handed out so far, enabled or not.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// The enabled channel of `pin`.
    pub fn channel(&self, pin: Pin) -> Option<&Channel> {
        self.channels.iter().find(|c| c.enabled && c.pin == pin)
    }
}
