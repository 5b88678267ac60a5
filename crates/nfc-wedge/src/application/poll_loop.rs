//! Emit loop: poll the reader, suppress duplicates, hand new UIDs to the sink.
//!
//! # How one cycle works (for beginners)
//!
//! ```text
//!   poll_once(reader) ──▶ Success(uid) ──▶ new? ──yes──▶ sink.send(uid), record
//!          │                                 └──no───▶ nothing
//!          └──────────▶ NoCard / TransportError ──▶ forget the held UID
//! ```
//!
//! The loop owns the [`DedupeFilter`], so nothing outside it can see or change
//! which card is "currently on the reader".  Cycles are strictly sequential:
//! [`poll_once`] releases the reader connection before it returns, and the
//! next cycle only starts after the pacing sleep.
//!
//! Only a sink failure stops the loop.  Reader trouble of any kind is logged
//! and retried on the next cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, trace, warn};
use wedge_core::{DedupeFilter, DedupeState, StatusWord, Uid};

use super::emit_uid::{InjectionError, UidSink};
use super::read_card::{poll_once, CardReader, PollResult};

/// What a single [`EmitLoop::poll_cycle`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new UID was read and sent to the sink.
    Emitted(Uid),
    /// The UID already held by the filter was read again; nothing was sent.
    Duplicate(Uid),
    /// No card, or the card answered with a non-success status.
    NoCard { status: Option<StatusWord> },
    /// Connect or transmit failed.
    TransportError(String),
}

/// The read/dedupe/emit control loop.
pub struct EmitLoop<R, S> {
    reader: R,
    sink: S,
    dedupe: DedupeFilter,
    poll_interval: Duration,
}

impl<R: CardReader, S: UidSink> EmitLoop<R, S> {
    pub fn new(reader: R, sink: S, poll_interval: Duration) -> Self {
        Self {
            reader,
            sink,
            dedupe: DedupeFilter::new(),
            poll_interval,
        }
    }

    /// Runs one poll and applies the dedupe state machine to its result.
    ///
    /// # Errors
    ///
    /// Returns the sink's [`InjectionError`] if emitting a new UID fails.  The
    /// filter is left unchanged in that case.
    pub fn poll_cycle(&mut self) -> Result<CycleOutcome, InjectionError> {
        match poll_once(&mut self.reader) {
            PollResult::Success(uid) => {
                if !self.dedupe.is_new(&uid) {
                    trace!(uid = %uid, "card still present");
                    return Ok(CycleOutcome::Duplicate(uid));
                }
                info!(uid = %uid, "card read");
                self.sink.send(&uid)?;
                self.dedupe.record(uid.clone());
                Ok(CycleOutcome::Emitted(uid))
            }
            PollResult::NoCard { status } => {
                match status {
                    Some(sw) => debug!(status = %sw, "no UID returned"),
                    None => debug!("no card present"),
                }
                self.forget();
                Ok(CycleOutcome::NoCard { status })
            }
            PollResult::TransportError(detail) => {
                warn!(error = %detail, "reader transaction failed");
                self.forget();
                Ok(CycleOutcome::TransportError(detail))
            }
        }
    }

    fn forget(&mut self) {
        if let Some(uid) = self.dedupe.clear() {
            debug!(uid = %uid, "card removed");
        }
    }

    /// Polls until `should_stop` returns `true`, sleeping `poll_interval`
    /// between cycles.  `should_stop` is checked before every cycle, so the
    /// cycle in progress always finishes.
    ///
    /// # Errors
    ///
    /// Returns the first sink failure.
    pub fn run_until<F>(&mut self, mut should_stop: F) -> Result<(), InjectionError>
    where
        F: FnMut() -> bool,
    {
        while !should_stop() {
            self.poll_cycle()?;
            if !self.poll_interval.is_zero() {
                thread::sleep(self.poll_interval);
            }
        }
        Ok(())
    }

    /// Polls while `running` stays `true`; the Ctrl-C handler clears it.
    ///
    /// # Errors
    ///
    /// Returns the first sink failure.
    pub fn run(&mut self, running: &AtomicBool) -> Result<(), InjectionError> {
        info!(interval_ms = self.poll_interval.as_millis() as u64, "polling started");
        let result = self.run_until(|| !running.load(Ordering::Relaxed));
        if result.is_ok() {
            info!("polling stopped");
        }
        result
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn dedupe_state(&self) -> &DedupeState {
        self.dedupe.state()
    }

    /// Consumes the loop, returning the reader and the sink.
    pub fn into_parts(self) -> (R, S) {
        (self.reader, self.sink)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
