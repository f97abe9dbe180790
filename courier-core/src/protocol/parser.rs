// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte-stream parser for the Courier command protocol.
//!
//! The link normally carries one command per byte. A [`Command::SendMessage`] byte switches the
//! parser into message framing until the stop character arrives or the message buffer fills.

use crate::protocol::messages::*;

/// Something complete came off the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    Message(Message),
}

enum State {
    WaitCommand,
    Collecting,
}

pub struct Parser {
    state: State,
    message: Message,
}

impl Parser {
    pub const fn new() -> Self {
        Self {
            state: State::WaitCommand,
            message: Message::new(),
        }
    }

    /// `true` while a display message is being collected.
    #[inline]
    pub fn in_message(&self) -> bool {
        matches!(self.state, State::Collecting)
    }

    /// Process a single incoming byte. Returns an [`Event`] once a command or message is complete.
    pub fn push(&mut self, byte: u8) -> Option<Event> {
        match self.state {
            State::WaitCommand => {
                let cmd = Command::from_byte(byte)?;
                if cmd == Command::SendMessage {
                    self.message.clear();
                    self.state = State::Collecting;
                }
                Some(Event::Command(cmd))
            }
            State::Collecting => {
                if byte == STOP_CHAR {
                    return Some(self.finish());
                }

                // Capacity was checked after the previous byte, so this always fits.
                let _ = self.message.push(byte);
                if self.message.is_full() {
                    return Some(self.finish());
                }
                None
            }
        }
    }

    fn finish(&mut self) -> Event {
        self.state = State::WaitCommand;
        Event::Message(core::mem::take(&mut self.message))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(parser: &mut Parser, bytes: &[u8]) -> Option<Event> {
        let mut last = None;
        for &b in bytes {
            if let Some(ev) = parser.push(b) {
                last = Some(ev);
            }
        }
        last
    }

    #[test]
    fn single_bytes_are_commands() {
        let mut p = Parser::new();
        assert_eq!(p.push(b'1'), Some(Event::Command(Command::Forward)));
        assert_eq!(p.push(b';'), Some(Event::Command(Command::RequestReverse)));
        assert_eq!(p.push(b'0'), Some(Event::Command(Command::KeepAlive)));
    }

    #[test]
    fn unknown_bytes_are_ignored() {
        let mut p = Parser::new();
        assert_eq!(p.push(b'x'), None);
        assert_eq!(p.push(0xFF), None);
        assert_eq!(p.push(b':'), None);
        assert!(!p.in_message());
    }

    #[test]
    fn message_ends_at_stop_char() {
        let mut p = Parser::new();
        assert_eq!(p.push(b'9'), Some(Event::Command(Command::SendMessage)));
        assert!(p.in_message());

        // Command bytes inside a message are text.
        let ev = feed(&mut p, b"Hi 123:");
        let Some(Event::Message(msg)) = ev else {
            panic!("expected a message, got {ev:?}");
        };
        assert_eq!(msg.as_slice(), b"Hi 123");
        assert!(!p.in_message());

        assert_eq!(p.push(b'3'), Some(Event::Command(Command::Stop)));
    }

    #[test]
    fn full_buffer_ends_the_message() {
        let mut p = Parser::new();
        p.push(b'9');
        let text = [b'a'; MESSAGE_CAPACITY];
        let ev = feed(&mut p, &text);
        let Some(Event::Message(msg)) = ev else {
            panic!("expected a message, got {ev:?}");
        };
        assert_eq!(msg.len(), MESSAGE_CAPACITY);
        assert!(!p.in_message());
    }

    #[test]
    fn empty_message() {
        let mut p = Parser::new();
        p.push(b'9');
        assert_eq!(p.push(b':'), Some(Event::Message(Message::new())));
    }
}
