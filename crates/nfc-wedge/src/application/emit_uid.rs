//! Emitting a UID: the sink capability and the keystroke emission procedure.
//!
//! The poll loop hands every newly seen UID to a [`UidSink`].  Two kinds of
//! sink exist:
//!
//! - [`KeystrokeSink`] types the UID through a [`PlatformKeyInjector`]
//!   (XTest, uinput, `SendInput`, CoreGraphics), one key at a time, followed
//!   by the terminator key.
//! - The console sink in the infrastructure layer prints the UID instead.
//!
//! Sink failures are returned as [`InjectionError`] and end the poll loop: a
//! wedge that cannot type is not doing its job.

use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::trace;
use wedge_core::{
    keymap::{keystrokes_for, HidKeyCode},
    Terminator, Uid,
};

/// Error type for key injection operations.
#[derive(Debug, Error)]
pub enum InjectionError {
    /// The OS call injecting the event failed.
    #[error("platform error: {0}")]
    Platform(String),

    /// The backend could not be opened (no X display, no uinput access, ...).
    #[error("injection backend unavailable: {0}")]
    Unavailable(String),

    /// Writing to the device or stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Platform-agnostic key injection trait.
///
/// Each supported OS provides an implementation in the infrastructure layer.
pub trait PlatformKeyInjector {
    /// Emulates a key press (key-down event).
    fn key_down(&mut self, key: HidKeyCode) -> Result<(), InjectionError>;

    /// Emulates a key release (key-up event).
    fn key_up(&mut self, key: HidKeyCode) -> Result<(), InjectionError>;

    /// Flushes queued events so the OS delivers them in emission order.
    fn sync(&mut self) -> Result<(), InjectionError>;

    /// Presses and releases `key`, then synchronizes.
    fn press(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.key_down(key)?;
        self.key_up(key)?;
        self.sync()
    }
}

impl<T: PlatformKeyInjector + ?Sized> PlatformKeyInjector for Box<T> {
    fn key_down(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        (**self).key_down(key)
    }

    fn key_up(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        (**self).key_up(key)
    }

    fn sync(&mut self) -> Result<(), InjectionError> {
        (**self).sync()
    }
}

/// Receives each newly presented UID.
pub trait UidSink {
    fn send(&mut self, uid: &Uid) -> Result<(), InjectionError>;
}

impl<T: UidSink + ?Sized> UidSink for Box<T> {
    fn send(&mut self, uid: &Uid) -> Result<(), InjectionError> {
        (**self).send(uid)
    }
}

/// Types `uid_hex` through `injector`, then the terminator key.
///
/// Each hex character is pressed, released and synchronized, followed by
/// `inter_key_delay` so slow input handlers do not drop events.  Characters
/// outside `[0-9A-Fa-f]` are skipped.  Returns the number of keys pressed.
///
/// # Errors
///
/// Returns the first [`InjectionError`] raised by the injector.
pub fn emit_keystrokes<I: PlatformKeyInjector + ?Sized>(
    injector: &mut I,
    uid_hex: &str,
    inter_key_delay: Duration,
    terminator: Terminator,
) -> Result<usize, InjectionError> {
    let keys = keystrokes_for(uid_hex, terminator);
    for &key in &keys {
        trace!(?key, "press");
        injector.press(key)?;
        if !key.is_terminator() && !inter_key_delay.is_zero() {
            thread::sleep(inter_key_delay);
        }
    }
    Ok(keys.len())
}

/// A [`UidSink`] that types the UID on the keyboard.
#[derive(Debug)]
pub struct KeystrokeSink<I> {
    injector: I,
    inter_key_delay: Duration,
    terminator: Terminator,
}

impl<I: PlatformKeyInjector> KeystrokeSink<I> {
    pub fn new(injector: I, inter_key_delay: Duration, terminator: Terminator) -> Self {
        Self {
            injector,
            inter_key_delay,
            terminator,
        }
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }
}

impl<I: PlatformKeyInjector> UidSink for KeystrokeSink<I> {
    fn send(&mut self, uid: &Uid) -> Result<(), InjectionError> {
        emit_keystrokes(
            &mut self.injector,
            uid.as_hex(),
            self.inter_key_delay,
            self.terminator,
        )
        .map(|_| ())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use wedge_core::keymap::HidKeyCode::*;

    // ── Recording injector ────────────────────────────────────────────────────

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Down(HidKeyCode),
        Up(HidKeyCode),
        Sync,
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
        fail_on: Option<HidKeyCode>,
    }

    impl PlatformKeyInjector for Recorder {
        fn key_down(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
            if self.fail_on == Some(key) {
                return Err(InjectionError::Platform("injected failure".to_string()));
            }
            self.events.push(Event::Down(key));
            Ok(())
        }

        fn key_up(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
            self.events.push(Event::Up(key));
            Ok(())
        }

        fn sync(&mut self) -> Result<(), InjectionError> {
            self.events.push(Event::Sync);
            Ok(())
        }
    }

    fn pressed(events: &[Event]) -> Vec<HidKeyCode> {
        events
            .chunks(3)
            .map(|chunk| match chunk {
                [Event::Down(a), Event::Up(b), Event::Sync] if a == b => *a,
                other => panic!("expected down/up/sync triple, got {other:?}"),
            })
            .collect()
    }

    // ── emit_keystrokes ───────────────────────────────────────────────────────

    #[test]
    fn test_emit_types_each_character_then_enter() {
        // Arrange
        let mut rec = Recorder::default();

        // Act
        let count = emit_keystrokes(&mut rec, "04A1B2C3", Duration::ZERO, Terminator::Enter).unwrap();

        // Assert
        assert_eq!(count, 9);
        assert_eq!(
            pressed(&rec.events),
            vec![Digit0, Digit4, KeyA, Digit1, KeyB, Digit2, KeyC, Digit3, Enter]
        );
    }

    #[test]
    fn test_emit_syncs_after_every_key() {
        let mut rec = Recorder::default();

        emit_keystrokes(&mut rec, "0F", Duration::ZERO, Terminator::Enter).unwrap();

        let syncs = rec.events.iter().filter(|e| **e == Event::Sync).count();
        assert_eq!(syncs, 3);
    }

    #[test]
    fn test_emit_skips_unmapped_characters() {
        let mut rec = Recorder::default();

        emit_keystrokes(&mut rec, "0A-1b", Duration::ZERO, Terminator::Tab).unwrap();

        assert_eq!(pressed(&rec.events), vec![Digit0, KeyA, Digit1, KeyB, Tab]);
    }

    #[test]
    fn test_emit_without_terminator_types_uid_only() {
        let mut rec = Recorder::default();

        emit_keystrokes(&mut rec, "12", Duration::ZERO, Terminator::None).unwrap();

        assert_eq!(pressed(&rec.events), vec![Digit1, Digit2]);
    }

    #[test]
    fn test_emit_waits_between_characters() {
        // Arrange
        let mut rec = Recorder::default();
        let delay = Duration::from_millis(10);
        let start = Instant::now();

        // Act – three characters, so at least three delays
        emit_keystrokes(&mut rec, "ABC", delay, Terminator::Enter).unwrap();

        // Assert
        assert!(start.elapsed() >= delay * 3);
    }

    #[test]
    fn test_emit_stops_at_first_injector_failure() {
        let mut rec = Recorder {
            fail_on: Some(KeyB),
            ..Recorder::default()
        };

        let result = emit_keystrokes(&mut rec, "AB12", Duration::ZERO, Terminator::Enter);

        assert!(matches!(result, Err(InjectionError::Platform(_))));
        assert_eq!(pressed(&rec.events), vec![KeyA]);
    }

    // ── KeystrokeSink ─────────────────────────────────────────────────────────

    #[test]
    fn test_keystroke_sink_sends_uid_through_injector() {
        let mut sink = KeystrokeSink::new(Recorder::default(), Duration::ZERO, Terminator::Enter);

        sink.send(&Uid::from_bytes(&[0xDE, 0x01])).unwrap();

        assert_eq!(
            pressed(&sink.injector().events),
            vec![KeyD, KeyE, Digit0, Digit1, Enter]
        );
    }

    #[test]
    fn test_boxed_sink_forwards_send() {
        let mut sink: Box<dyn UidSink> = Box::new(KeystrokeSink::new(
            Recorder::default(),
            Duration::ZERO,
            Terminator::Enter,
        ));

        assert!(sink.send(&Uid::from_bytes(&[0x00])).is_ok());
    }
}
