// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side codec.
//!
//! Everything a host tool needs to talk to the firmware without a serial library: textual command
//! parsing, request frames, and response decoding. No I/O happens here.
//!
//! ```text
//! "aw 9 128"  --parse-->  Request::AnalogWrite  --encode-->  [05 09 80]
//! [FF]        --decode_response-->  Response::Ack
//! ```
//!
//! Textual commands accept the full names (`digitalwrite 13 1`) and the short aliases:
//!
//! | Alias | Command |
//! | ----- | ------- |
//! | `i` | `info` |
//! | `dr` | `digitalread` |
//! | `ar` | `analogread` |
//! | `dw` | `digitalwrite` |
//! | `aw` | `analogwrite` |
//! | `pm` | `pinmode` |
//! | `r` | `reset` |
//! | `on <pin>` | `digitalwrite <pin> 1` |
//! | `off <pin>` | `digitalwrite <pin> 0` |

use core::fmt;
use core::str::SplitWhitespace;

use heapless::Vec;

use crate::config::Config;
use crate::hw::PinMode;
use crate::protocol::info::{DecodeError, InfoDescriptor};
use crate::protocol::messages::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Nop,
    Info,
    DigitalRead { pin: u8 },
    DigitalWrite { pin: u8, high: bool },
    AnalogRead { pin: u8 },
    AnalogWrite { pin: u8, duty: u8 },
    PinMode { pin: u8, mode: PinMode },
    Reset,
}

/// Sentinels the device terminates its responses with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseCodes {
    pub success: u8,
    pub error: u8,
}

impl Default for ResponseCodes {
    fn default() -> Self {
        Self {
            success: 0xFF,
            error: 0xFE,
        }
    }
}

impl From<&Config> for ResponseCodes {
    fn from(config: &Config) -> Self {
        Self {
            success: config.success_code,
            error: config.error_code,
        }
    }
}

impl From<&InfoDescriptor<'_>> for ResponseCodes {
    fn from(info: &InfoDescriptor<'_>) -> Self {
        Self {
            success: info.success_code,
            error: info.error_code,
        }
    }
}

/// A decoded response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response<'a> {
    /// Success without output.
    Ack,
    /// DIGITALREAD (0 or 1) or ANALOGREAD result.
    Value(u16),
    Info(InfoDescriptor<'a>),
    /// The device answered with the error sentinel.
    DeviceError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientError {
    /// Blank command line.
    Empty,
    UnknownCommand,
    /// A required argument is absent; names the argument.
    MissingArgument(&'static str),
    /// Argument is neither a keyword nor a number in `0..=255`.
    BadNumber,
    /// Response ended before its terminator.
    Truncated,
    /// Byte in the terminator position is not the success sentinel.
    Unterminated(u8),
    Decode(DecodeError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Empty => write!(f, "empty command"),
            ClientError::UnknownCommand => write!(f, "unknown command"),
            ClientError::MissingArgument(name) => write!(f, "missing argument: {}", name),
            ClientError::BadNumber => write!(f, "expected a number from 0 to 255"),
            ClientError::Truncated => write!(f, "short response"),
            ClientError::Unterminated(b) => write!(f, "unexpected terminator 0x{:02X}", b),
            ClientError::Decode(e) => write!(f, "bad INFO descriptor: {}", e),
        }
    }
}

impl From<DecodeError> for ClientError {
    fn from(e: DecodeError) -> Self {
        ClientError::Decode(e)
    }
}

fn is_any(word: &str, names: &[&str]) -> bool {
    names.iter().any(|n| word.eq_ignore_ascii_case(n))
}

/// Decimal or `0x` hexadecimal byte.
fn number(word: &str) -> Result<u8, ClientError> {
    let parsed = match word.strip_prefix("0x").or_else(|| word.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => word.parse(),
    };
    parsed.map_err(|_| ClientError::BadNumber)
}

fn next_number(words: &mut SplitWhitespace<'_>, name: &'static str) -> Result<u8, ClientError> {
    words
        .next()
        .ok_or(ClientError::MissingArgument(name))
        .and_then(number)
}

fn next_level(words: &mut SplitWhitespace<'_>) -> Result<bool, ClientError> {
    let word = words.next().ok_or(ClientError::MissingArgument("level"))?;
    if is_any(word, &["on", "true", "high", "h"]) {
        Ok(true)
    } else if is_any(word, &["off", "false", "low", "l"]) {
        Ok(false)
    } else {
        number(word).map(|n| n != 0)
    }
}

fn next_mode(words: &mut SplitWhitespace<'_>) -> Result<PinMode, ClientError> {
    let word = words.next().ok_or(ClientError::MissingArgument("mode"))?;
    if is_any(word, &["in", "input"]) {
        Ok(PinMode::Input)
    } else if is_any(word, &["out", "output"]) {
        Ok(PinMode::Output)
    } else if is_any(word, &["pullup", "input_pullup"]) {
        Ok(PinMode::InputPullUp)
    } else {
        number(word).map(PinMode::from_wire)
    }
}

/// Check that the byte at `pos` is the success sentinel.
fn terminator(bytes: &[u8], pos: usize, codes: ResponseCodes) -> Result<(), ClientError> {
    match bytes.get(pos) {
        Some(&b) if b == codes.success => Ok(()),
        Some(&b) => Err(ClientError::Unterminated(b)),
        None => Err(ClientError::Truncated),
    }
}

impl Request {
    /// Parse a textual command such as `dw 13 on` or `pinmode 4 pullup`.
    ///
    /// Command names and keywords are case-insensitive. Words after the last argument are ignored.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ClientError::Empty)?;
        let w = &mut words;

        let request = if is_any(name, &["nop"]) {
            Request::Nop
        } else if is_any(name, &["info", "i"]) {
            Request::Info
        } else if is_any(name, &["digitalread", "dr"]) {
            Request::DigitalRead {
                pin: next_number(w, "pin")?,
            }
        } else if is_any(name, &["analogread", "ar"]) {
            Request::AnalogRead {
                pin: next_number(w, "pin")?,
            }
        } else if is_any(name, &["digitalwrite", "dw"]) {
            Request::DigitalWrite {
                pin: next_number(w, "pin")?,
                high: next_level(w)?,
            }
        } else if is_any(name, &["on", "off"]) {
            Request::DigitalWrite {
                pin: next_number(w, "pin")?,
                high: name.eq_ignore_ascii_case("on"),
            }
        } else if is_any(name, &["analogwrite", "aw"]) {
            Request::AnalogWrite {
                pin: next_number(w, "pin")?,
                duty: next_number(w, "duty")?,
            }
        } else if is_any(name, &["pinmode", "pm"]) {
            Request::PinMode {
                pin: next_number(w, "pin")?,
                mode: next_mode(w)?,
            }
        } else if is_any(name, &["reset", "r"]) {
            Request::Reset
        } else {
            return Err(ClientError::UnknownCommand);
        };
        Ok(request)
    }

    pub fn opcode(&self) -> u8 {
        match self {
            Request::Nop => CMD_NOP,
            Request::Info => CMD_INFO,
            Request::DigitalRead { .. } => CMD_DIGITALREAD,
            Request::DigitalWrite { .. } => CMD_DIGITALWRITE,
            Request::AnalogRead { .. } => CMD_ANALOGREAD,
            Request::AnalogWrite { .. } => CMD_ANALOGWRITE,
            Request::PinMode { .. } => CMD_PINMODE,
            Request::Reset => CMD_RESET,
        }
    }

    /// Request frame.
    pub fn encode(&self) -> Vec<u8, 3> {
        let mut frame = Vec::new();
        // At most three bytes, pushes cannot fail.
        let _ = frame.push(self.opcode());
        match *self {
            Request::Nop | Request::Info | Request::Reset => {}
            Request::DigitalRead { pin } | Request::AnalogRead { pin } => {
                let _ = frame.push(pin);
            }
            Request::DigitalWrite { pin, high } => {
                let _ = frame.extend_from_slice(&[pin, u8::from(high)]);
            }
            Request::AnalogWrite { pin, duty } => {
                let _ = frame.extend_from_slice(&[pin, duty]);
            }
            Request::PinMode { pin, mode } => {
                let _ = frame.extend_from_slice(&[pin, mode.to_wire()]);
            }
        }
        frame
    }

    /// Length of a successful response, or `None` for INFO, whose length depends on the
    /// descriptor. A failed response is always a single byte.
    pub fn response_len(&self) -> Option<usize> {
        match self {
            Request::Info => None,
            Request::DigitalRead { .. } => Some(2),
            Request::AnalogRead { .. } => Some(3),
            _ => Some(1),
        }
    }

    /// Decode the device's answer to this request.
    ///
    /// Framing is positional: a value byte equal to the error sentinel is only taken as a device
    /// error if the success sentinel is not where it belongs. Bytes after the terminator are
    /// ignored.
    ///
    /// # Errors
    ///
    /// `Truncated` if the terminator has not arrived, `Unterminated` if a different byte sits in
    /// its place, and `Decode` for a malformed INFO descriptor.
    pub fn decode_response<'a>(
        &self,
        bytes: &'a [u8],
        codes: ResponseCodes,
    ) -> Result<Response<'a>, ClientError> {
        let is_error = bytes.first() == Some(&codes.error);

        let payload_len = match self.response_len() {
            Some(len) => len - 1,
            None => {
                if is_error {
                    return Ok(Response::DeviceError);
                }
                let (descriptor, used) = InfoDescriptor::decode(bytes)?;
                terminator(bytes, used, codes)?;
                return Ok(Response::Info(descriptor));
            }
        };

        match terminator(bytes, payload_len, codes) {
            Ok(()) => {}
            Err(_) if is_error => return Ok(Response::DeviceError),
            Err(e) => return Err(e),
        }

        let p = &bytes[..payload_len];
        let response = match payload_len {
            0 => Response::Ack,
            1 => Response::Value(u16::from(p[0])),
            _ => Response::Value(u16::from_le_bytes([p[0], p[1]])),
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODES: ResponseCodes = ResponseCodes {
        success: 0xFF,
        error: 0xFE,
    };

    #[test]
    fn aliases_match_full_names() {
        let pairs = [
            ("i", "info"),
            ("dr 3", "digitalread 3"),
            ("ar 14", "analogread 14"),
            ("dw 13 1", "digitalwrite 13 1"),
            ("aw 9 128", "analogwrite 9 128"),
            ("pm 4 out", "pinmode 4 out"),
            ("r", "reset"),
        ];
        for (alias, full) in pairs {
            assert_eq!(Request::parse(alias), Request::parse(full));
        }
    }

    #[test]
    fn on_and_off_shortcuts() {
        assert_eq!(
            Request::parse("on 13"),
            Ok(Request::DigitalWrite { pin: 13, high: true })
        );
        assert_eq!(
            Request::parse("OFF 13"),
            Ok(Request::DigitalWrite { pin: 13, high: false })
        );
        assert_eq!(Request::parse("on"), Err(ClientError::MissingArgument("pin")));
    }

    #[test]
    fn level_keywords() {
        for word in ["on", "true", "HIGH", "h", "1", "7"] {
            let line = format!("dw 2 {}", word);
            assert_eq!(
                Request::parse(&line),
                Ok(Request::DigitalWrite { pin: 2, high: true }),
                "{}",
                word
            );
        }
        for word in ["off", "false", "low", "L", "0"] {
            let line = format!("dw 2 {}", word);
            assert_eq!(
                Request::parse(&line),
                Ok(Request::DigitalWrite { pin: 2, high: false }),
                "{}",
                word
            );
        }
    }

    #[test]
    fn mode_keywords() {
        let cases = [
            ("in", PinMode::Input),
            ("input", PinMode::Input),
            ("out", PinMode::Output),
            ("Output", PinMode::Output),
            ("pullup", PinMode::InputPullUp),
            ("input_pullup", PinMode::InputPullUp),
            ("2", PinMode::InputPullUp),
            ("5", PinMode::Output),
        ];
        for (word, mode) in cases {
            let line = format!("pm 4 {}", word);
            assert_eq!(Request::parse(&line), Ok(Request::PinMode { pin: 4, mode }));
        }
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Request::parse("   "), Err(ClientError::Empty));
        assert_eq!(Request::parse("blink 3"), Err(ClientError::UnknownCommand));
        assert_eq!(Request::parse("aw 9"), Err(ClientError::MissingArgument("duty")));
        assert_eq!(Request::parse("dr x"), Err(ClientError::BadNumber));
        assert_eq!(Request::parse("dr 256"), Err(ClientError::BadNumber));
        assert_eq!(Request::parse("aw 0x09 0xFF"), Ok(Request::AnalogWrite { pin: 9, duty: 255 }));
    }

    #[test]
    fn frames() {
        assert_eq!(Request::Nop.encode().as_slice(), &[CMD_NOP]);
        assert_eq!(Request::AnalogRead { pin: 14 }.encode().as_slice(), &[CMD_ANALOGREAD, 14]);
        assert_eq!(
            Request::DigitalWrite { pin: 13, high: true }.encode().as_slice(),
            &[CMD_DIGITALWRITE, 13, 1]
        );
        assert_eq!(
            Request::PinMode { pin: 4, mode: PinMode::InputPullUp }.encode().as_slice(),
            &[CMD_PINMODE, 4, 2]
        );
    }

    #[test]
    fn fixed_width_responses() {
        let dr = Request::DigitalRead { pin: 2 };
        assert_eq!(dr.decode_response(&[1, 0xFF], CODES), Ok(Response::Value(1)));
        assert_eq!(dr.decode_response(&[1], CODES), Err(ClientError::Truncated));

        let ar = Request::AnalogRead { pin: 14 };
        assert_eq!(ar.response_len(), Some(3));
        assert_eq!(
            ar.decode_response(&[0xFF, 0x03, 0xFF], CODES),
            Ok(Response::Value(0x03FF))
        );
        assert_eq!(
            ar.decode_response(&[0x10, 0x00, 0x00], CODES),
            Err(ClientError::Unterminated(0x00))
        );

        assert_eq!(Request::Reset.decode_response(&[0xFF], CODES), Ok(Response::Ack));
    }

    #[test]
    fn value_bytes_may_equal_the_error_sentinel() {
        let ar = Request::AnalogRead { pin: 14 };
        assert_eq!(
            ar.decode_response(&[0xFE, 0x00, 0xFF], CODES),
            Ok(Response::Value(0x00FE))
        );
        assert_eq!(ar.decode_response(&[0xFE], CODES), Ok(Response::DeviceError));
    }

    #[test]
    fn error_sentinel_is_a_device_error() {
        for req in [Request::Info, Request::AnalogWrite { pin: 2, duty: 9 }, Request::AnalogRead { pin: 40 }] {
            assert_eq!(req.decode_response(&[0xFE], CODES), Ok(Response::DeviceError));
        }
    }

    #[test]
    fn info_response() {
        let cfg = Config::ARDUINO_UNO;
        let mut bytes = std::vec::Vec::new();
        InfoDescriptor::new(&cfg, 77, 512, 10, 6).encode(|b| bytes.push(b));
        bytes.push(0xFF);

        match Request::Info.decode_response(&bytes, CODES) {
            Ok(Response::Info(d)) => {
                assert_eq!(d.uptime_ms, 77);
                assert_eq!(ResponseCodes::from(&d), CODES);
            }
            other => panic!("unexpected {:?}", other),
        }

        bytes.pop();
        assert_eq!(
            Request::Info.decode_response(&bytes, CODES),
            Err(ClientError::Truncated)
        );
    }
}
