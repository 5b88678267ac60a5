//! PC/SC card reader adapter.
//!
//! # How the wedge talks to the reader (for beginners)
//!
//! PC/SC is the standard smartcard API on every desktop OS.  A process first
//! establishes a *context* with the PC/SC service, enumerates the attached
//! readers by name, and then, once per poll, *connects* to the card in a
//! reader's field, *transmits* a command APDU and *disconnects* again.
//!
//! ```text
//!   Context::establish ─▶ list_readers_owned ─▶ pick a reader by name
//!                                                   │
//!          ┌────────────── every poll ──────────────┘
//!          ▼
//!   connect(Shared, ANY) ─▶ transmit(FF CA 00 00 00) ─▶ disconnect(LeaveCard)
//! ```
//!
//! Contactless readers expose the card UID through the pseudo-APDU
//! `FF CA 00 00 00`; the reader answers it itself without talking to the
//! card's applications.
//!
//! # Error classification
//!
//! Every `pcsc::Error` is mapped to a [`ReaderError`] by [`classify_connect`]
//! and [`classify_transmit`].  The poll loop treats all of them except
//! [`ReaderError::NoCard`] as a transport error and tries again next cycle.
//!
//! Some platforms stop the PC/SC service when the last reader is removed,
//! which invalidates the context.  After an error for which
//! [`invalidates_context`] holds, [`PcscReader`] establishes a fresh context
//! before its next connect, so the same reader name is found again once it
//! is plugged back in.

use std::ffi::CString;
use std::fmt;

use pcsc::{Card, Context, Disposition, Protocols, Scope, ShareMode};
use tracing::{debug, info};
use wedge_core::ApduResponse;

use crate::application::read_card::{CardReader, ReaderError};

/// Maps a failed `connect` to a [`ReaderError`].
pub fn classify_connect(err: pcsc::Error) -> ReaderError {
    match err {
        pcsc::Error::NoSmartcard | pcsc::Error::RemovedCard => ReaderError::NoCard,
        pcsc::Error::UnknownReader
        | pcsc::Error::ReaderUnavailable
        | pcsc::Error::NoReadersAvailable
        | pcsc::Error::NoService
        | pcsc::Error::ServiceStopped => ReaderError::ReaderUnavailable(err.to_string()),
        other => ReaderError::Driver(other.to_string()),
    }
}

/// Maps a failed `transmit` to a [`ReaderError`].
pub fn classify_transmit(err: pcsc::Error) -> ReaderError {
    match err {
        pcsc::Error::RemovedCard | pcsc::Error::ResetCard => ReaderError::CardRemoved,
        pcsc::Error::ReaderUnavailable | pcsc::Error::NoService | pcsc::Error::ServiceStopped => {
            ReaderError::ReaderUnavailable(err.to_string())
        }
        other => ReaderError::Driver(other.to_string()),
    }
}

/// Returns `true` for errors after which the context handle is no longer
/// usable and a new one must be established.
pub fn invalidates_context(err: &pcsc::Error) -> bool {
    matches!(
        err,
        pcsc::Error::NoService | pcsc::Error::ServiceStopped | pcsc::Error::InvalidHandle
    )
}

fn driver_error(err: pcsc::Error) -> ReaderError {
    match err {
        pcsc::Error::NoService | pcsc::Error::ServiceStopped => {
            ReaderError::ReaderUnavailable(err.to_string())
        }
        pcsc::Error::NoReadersAvailable => ReaderError::NoReaderFound(None),
        other => ReaderError::Driver(other.to_string()),
    }
}

/// Returns the first name containing `filter`, or the first name when no
/// filter is given.
pub fn choose_reader<'a>(names: &'a [String], filter: Option<&str>) -> Option<&'a str> {
    match filter {
        Some(f) => names.iter().find(|n| n.contains(f)).map(String::as_str),
        None => names.first().map(String::as_str),
    }
}

/// Owns the PC/SC context and enumerates readers.
pub struct PcscReaderManager {
    context: Context,
}

impl PcscReaderManager {
    /// Establishes a user-scope context with the PC/SC service.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::ReaderUnavailable`] when the service is not
    /// running.
    pub fn new() -> Result<Self, ReaderError> {
        let context = Context::establish(Scope::User).map_err(driver_error)?;
        Ok(Self { context })
    }

    /// Names of all attached readers, in enumeration order.
    ///
    /// An empty list is returned (not an error) when no reader is attached.
    pub fn list_readers(&self) -> Result<Vec<String>, ReaderError> {
        match self.context.list_readers_owned() {
            Ok(names) => Ok(names
                .iter()
                .map(|n| n.to_string_lossy().into_owned())
                .collect()),
            Err(pcsc::Error::NoReadersAvailable) => Ok(Vec::new()),
            Err(e) => Err(driver_error(e)),
        }
    }

    /// Selects the reader the wedge will poll.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::NoReaderFound`] when no reader is attached or
    /// none matches `filter`.
    pub fn select(&self, filter: Option<&str>) -> Result<PcscReader, ReaderError> {
        let names = self.list_readers()?;
        for name in &names {
            debug!(reader = %name, "found reader");
        }
        let chosen = choose_reader(&names, filter)
            .ok_or_else(|| ReaderError::NoReaderFound(filter.map(str::to_owned)))?;
        info!(reader = %chosen, "using reader");
        PcscReader::new(self.context.clone(), chosen)
    }
}

/// One PC/SC reader, connected to a card only for the duration of a poll.
pub struct PcscReader {
    context: Context,
    context_lost: bool,
    name: CString,
    display_name: String,
    card: Option<Card>,
}

impl fmt::Debug for PcscReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscReader")
            .field("name", &self.display_name)
            .field("connected", &self.card.is_some())
            .field("context_lost", &self.context_lost)
            .finish()
    }
}

impl PcscReader {
    fn new(context: Context, name: &str) -> Result<Self, ReaderError> {
        let c_name = CString::new(name)
            .map_err(|_| ReaderError::Driver(format!("invalid reader name: {name:?}")))?;
        Ok(Self {
            context,
            context_lost: false,
            name: c_name,
            display_name: name.to_owned(),
            card: None,
        })
    }

    /// The reader name as reported by PC/SC.
    pub fn name(&self) -> &str {
        &self.display_name
    }

    /// Replaces a context the service has invalidated.
    ///
    /// Fails with [`ReaderError::ReaderUnavailable`] while the service is
    /// still down; the next connect tries again.
    fn reestablish_context(&mut self) -> Result<(), ReaderError> {
        let context = Context::establish(Scope::User).map_err(driver_error)?;
        self.context = context;
        self.context_lost = false;
        info!(reader = %self.display_name, "PC/SC context re-established");
        Ok(())
    }

    fn note_error(&mut self, err: &pcsc::Error) {
        if invalidates_context(err) && !self.context_lost {
            debug!(error = %err, "PC/SC context lost");
            self.context_lost = true;
        }
    }
}

impl CardReader for PcscReader {
    fn connect(&mut self) -> Result<(), ReaderError> {
        if self.context_lost {
            self.reestablish_context()?;
        }
        match self.context.connect(&self.name, ShareMode::Shared, Protocols::ANY) {
            Ok(card) => {
                self.card = Some(card);
                Ok(())
            }
            Err(e) => {
                self.note_error(&e);
                Err(classify_connect(e))
            }
        }
    }

    fn transmit(&mut self, command: &[u8]) -> Result<ApduResponse, ReaderError> {
        let card = self.card.as_ref().ok_or(ReaderError::NoCard)?;
        let mut buffer = [0u8; pcsc::MAX_BUFFER_SIZE];
        match card.transmit(command, &mut buffer) {
            Ok(reply) => Ok(ApduResponse::from_bytes(reply)?),
            Err(e) => {
                self.note_error(&e);
                Err(classify_transmit(e))
            }
        }
    }

    fn disconnect(&mut self) {
        if let Some(card) = self.card.take() {
            if let Err((_card, e)) = card.disconnect(Disposition::LeaveCard) {
                debug!(error = %e, "disconnect failed");
            }
        }
    }
}

impl Drop for PcscReader {
    fn drop(&mut self) {
        self.disconnect();
    }
}
