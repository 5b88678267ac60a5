//! Scripted card reader for tests.
//!
//! # Why a scripted reader?
//!
//! A real reader needs hardware and a person placing cards on it.  The
//! [`ScriptedReader`] replays one [`ScriptStep`] per poll instead, and counts
//! how its session methods were called so tests can check that every
//! connection was released.
//!
//! # Usage in tests
//!
//! ```ignore
//! let reader = ScriptedReader::new([
//!     ScriptStep::card(&[0x04, 0xA1]),
//!     ScriptStep::NoCard,
//!     ScriptStep::card(&[0x04, 0xA1]),
//! ]);
//! ```
//!
//! Once the script runs out, every further poll sees an empty field.

use std::collections::VecDeque;

use wedge_core::ApduResponse;

use crate::application::read_card::{CardReader, ReaderError};

/// What the reader does on one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// Connect succeeds and `transmit` returns this reply.
    Reply(ApduResponse),
    /// Connect reports an empty field.
    NoCard,
    /// Connect fails with this error.
    ConnectError(ReaderError),
    /// Connect succeeds, `transmit` fails with this error.
    TransmitError(ReaderError),
}

impl ScriptStep {
    /// A card with `uid` answering `90 00`.
    pub fn card(uid: &[u8]) -> Self {
        Self::Reply(ApduResponse::new(uid, 0x90, 0x00))
    }

    /// A reply with no data and the given status word.
    pub fn status(sw1: u8, sw2: u8) -> Self {
        Self::Reply(ApduResponse::new(Vec::new(), sw1, sw2))
    }
}

/// A [`CardReader`] replaying a fixed script.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    steps: VecDeque<ScriptStep>,
    pending: Option<Result<ApduResponse, ReaderError>>,
    connected: bool,
    /// Number of `connect` calls.
    pub connects: usize,
    /// Number of `disconnect` calls.
    pub disconnects: usize,
    /// Every command passed to `transmit`, in order.
    pub commands: Vec<Vec<u8>>,
    /// Number of times `connect` was called while a session was still open.
    pub overlapping_sessions: usize,
}

impl ScriptedReader {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    /// `true` while a connection is open.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl CardReader for ScriptedReader {
    fn connect(&mut self) -> Result<(), ReaderError> {
        self.connects += 1;
        if self.connected {
            self.overlapping_sessions += 1;
        }
        match self.steps.pop_front().unwrap_or(ScriptStep::NoCard) {
            ScriptStep::NoCard => Err(ReaderError::NoCard),
            ScriptStep::ConnectError(e) => Err(e),
            ScriptStep::Reply(response) => {
                self.connected = true;
                self.pending = Some(Ok(response));
                Ok(())
            }
            ScriptStep::TransmitError(e) => {
                self.connected = true;
                self.pending = Some(Err(e));
                Ok(())
            }
        }
    }

    fn transmit(&mut self, command: &[u8]) -> Result<ApduResponse, ReaderError> {
        self.commands.push(command.to_vec());
        if !self.connected {
            return Err(ReaderError::Driver("transmit without connection".into()));
        }
        self.pending.take().unwrap_or(Err(ReaderError::NoCard))
    }

    fn disconnect(&mut self) {
        self.disconnects += 1;
        self.connected = false;
        self.pending = None;
    }
}
