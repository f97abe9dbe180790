// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! One-byte command protocol used by the Courier remote.

use heapless::Vec;

use crate::motion::Motion;

/// Terminates a display message.
pub const STOP_CHAR: u8 = b':';

/// Longest display message (two 16-column LCD rows).
pub const MESSAGE_CAPACITY: usize = 32;

// Command bytes
pub const CMD_KEEP_ALIVE: u8 = b'0';
pub const CMD_FORWARD: u8 = b'1';
pub const CMD_BACKWARD: u8 = b'2';
pub const CMD_STOP: u8 = b'3';
pub const CMD_STEER_RIGHT: u8 = b'4';
pub const CMD_STEER_LEFT: u8 = b'5';
pub const CMD_GEAR_UP: u8 = b'6';
pub const CMD_GEAR_DOWN: u8 = b'7';
pub const CMD_CLEAR_SCREEN: u8 = b'8';
pub const CMD_SEND_MESSAGE: u8 = b'9';
pub const CMD_REQUEST_REVERSE: u8 = b';';
pub const CMD_BUZZER_ON: u8 = b'o';
pub const CMD_BUZZER_OFF: u8 = b'f';

/// Remote commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Proves the link is alive; no other effect.
    KeepAlive,
    Forward,
    Backward,
    Stop,
    SteerRight,
    SteerLeft,
    GearUp,
    GearDown,
    ClearScreen,
    /// The following bytes, up to [`STOP_CHAR`], are a display message.
    SendMessage,
    /// Drive back along the recorded path.
    RequestReverse,
    BuzzerOn,
    BuzzerOff,
}

impl Command {
    /// Decode a command byte. Unknown bytes decode to `None`.
    pub fn from_byte(byte: u8) -> Option<Self> {
        let cmd = match byte {
            CMD_KEEP_ALIVE => Command::KeepAlive,
            CMD_FORWARD => Command::Forward,
            CMD_BACKWARD => Command::Backward,
            CMD_STOP => Command::Stop,
            CMD_STEER_RIGHT => Command::SteerRight,
            CMD_STEER_LEFT => Command::SteerLeft,
            CMD_GEAR_UP => Command::GearUp,
            CMD_GEAR_DOWN => Command::GearDown,
            CMD_CLEAR_SCREEN => Command::ClearScreen,
            CMD_SEND_MESSAGE => Command::SendMessage,
            CMD_REQUEST_REVERSE => Command::RequestReverse,
            CMD_BUZZER_ON => Command::BuzzerOn,
            CMD_BUZZER_OFF => Command::BuzzerOff,
            _ => return None,
        };
        Some(cmd)
    }

    /// The drive mode this command selects, for the five motion commands.
    pub fn motion(self) -> Option<Motion> {
        match self {
            Command::Forward => Some(Motion::Forward),
            Command::Backward => Some(Motion::Backward),
            Command::Stop => Some(Motion::Stop),
            Command::SteerRight => Some(Motion::SteerRight),
            Command::SteerLeft => Some(Motion::SteerLeft),
            _ => None,
        }
    }
}

/// Display message payload, without the stop character.
pub type Message = Vec<u8, MESSAGE_CAPACITY>;
