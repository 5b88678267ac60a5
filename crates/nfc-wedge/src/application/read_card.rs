//! Reader session: one "get UID" transaction per call.
//!
//! [`poll_once`] opens a connection, sends [`GET_UID_COMMAND`], classifies the
//! reply and releases the connection again.  It never retries and never
//! returns an error: every failure is folded into [`PollResult`] so the caller
//! simply polls again on the next cycle.
//!
//! The reader itself is reached through the [`CardReader`] trait.  The PC/SC
//! implementation lives in the infrastructure layer; tests use a scripted
//! double.

use thiserror::Error;
use wedge_core::{ApduError, ApduResponse, StatusWord, Uid, GET_UID_COMMAND};

/// Error type for reader operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderError {
    /// No card is in the reader's field.
    #[error("no card present")]
    NoCard,

    /// The card left the field (or was reset) during the transaction.
    #[error("card removed during transaction")]
    CardRemoved,

    /// The reader was unplugged or the PC/SC service went away.
    #[error("reader unavailable: {0}")]
    ReaderUnavailable(String),

    /// No reader was enumerated, or none matched the configured filter.
    #[error("no card reader found{}", .0.as_deref().map(|f| format!(" matching '{f}'")).unwrap_or_default())]
    NoReaderFound(Option<String>),

    /// The reply could not be split into data and status bytes.
    #[error("malformed response: {0}")]
    Malformed(#[from] ApduError),

    /// Any other driver failure.
    #[error("PC/SC error: {0}")]
    Driver(String),
}

/// A single contactless reader.
///
/// Mirrors the PC/SC connection object: `connect`, `transmit`, `disconnect`.
/// `disconnect` must be safe to call on a session that was never connected
/// or has already been invalidated by card removal.
#[cfg_attr(test, mockall::automock)]
pub trait CardReader {
    /// Connects to the card currently in the field.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::NoCard`] when the field is empty.
    fn connect(&mut self) -> Result<(), ReaderError>;

    /// Sends one command APDU and returns the reply.
    fn transmit(&mut self, command: &[u8]) -> Result<ApduResponse, ReaderError>;

    /// Releases the connection, if any.
    fn disconnect(&mut self);
}

impl<T: CardReader + ?Sized> CardReader for Box<T> {
    fn connect(&mut self) -> Result<(), ReaderError> {
        (**self).connect()
    }

    fn transmit(&mut self, command: &[u8]) -> Result<ApduResponse, ReaderError> {
        (**self).transmit(command)
    }

    fn disconnect(&mut self) {
        (**self).disconnect()
    }
}

/// Outcome of one [`poll_once`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult {
    /// Status `90 00`; carries the rendered UID.
    Success(Uid),
    /// Empty field or a non-success status word (`None` when the reader
    /// reported no card before any command was sent).
    NoCard { status: Option<StatusWord> },
    /// Connect or transmit failed.
    TransportError(String),
}

/// Disconnects the wrapped reader when dropped, on every exit path.
struct SessionGuard<'a, R: CardReader + ?Sized> {
    reader: &'a mut R,
}

impl<R: CardReader + ?Sized> Drop for SessionGuard<'_, R> {
    fn drop(&mut self) {
        self.reader.disconnect();
    }
}

/// Runs one UID query against `reader`.
///
/// The connection is released before this function returns, whatever the
/// outcome.
pub fn poll_once<R: CardReader + ?Sized>(reader: &mut R) -> PollResult {
    match transact(reader) {
        Ok(response) if response.is_success() => {
            PollResult::Success(Uid::from_bytes(&response.data))
        }
        Ok(response) => PollResult::NoCard {
            status: Some(response.status),
        },
        Err(ReaderError::NoCard) => PollResult::NoCard { status: None },
        Err(e) => PollResult::TransportError(e.to_string()),
    }
}

fn transact<R: CardReader + ?Sized>(reader: &mut R) -> Result<ApduResponse, ReaderError> {
    let session = SessionGuard { reader };
    session.reader.connect()?;
    session.reader.transmit(&GET_UID_COMMAND)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
