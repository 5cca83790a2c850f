// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Binary command protocol.
//!
//! Frames carry no delimiters, escapes or checksums. Both ends know the argument count of every
//! opcode and the width of every response, so framing is purely positional.

pub mod info;
pub mod messages;
pub mod parser;
pub mod response;

pub use info::InfoDescriptor;
pub use messages::{required_args, Opcode};
pub use parser::CommandBuffer;
pub use response::CommandResult;
