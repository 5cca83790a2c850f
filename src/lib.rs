// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Pin REPL Firmware
//!
//! This crate implements a binary serial command protocol for remote pin control: reading and
//! writing digital and analog pins, configuring pin modes, and software-emulated PWM on pins that
//! lack a hardware PWM channel. Everything runs from one cooperative, non-blocking loop.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | Board abstraction, serial link, pin translation, STM32F7 board support |
//! | [`protocol`] | Opcodes, command buffer, responses and the INFO descriptor |
//! | [`soft_pwm`] | Software PWM timing engine |
//! | [`dispatch`] | Command execution against a board |
//! | [`repl`] | The session object and its scheduler tick |
//! | [`client`] | Host-side request/response codec |
//! | [`config`] | Typed firmware configuration |
//!
//! ## Getting Started
//!
//! Run the host test suite:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features firmware --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod logging;

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod hw;
pub mod protocol;
pub mod repl;
pub mod soft_pwm;

pub use config::Config;
pub use error::{Error, Result};
pub use repl::{Repl, Tick};
