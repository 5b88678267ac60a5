//! # wedge-core
//!
//! Shared library for nfc-wedge containing the APDU command/response types,
//! the card UID domain model, the duplicate-read filter, and the key code
//! translation tables used by every injection backend.
//!
//! It has zero dependencies on OS APIs, the PC/SC driver, or input devices.
//!
//! # Architecture overview (for beginners)
//!
//! nfc-wedge turns a contactless card reader into a "keyboard wedge": every
//! time a new card is placed on the reader, its identifier is typed into
//! whatever application has focus, followed by Enter.
//!
//! This crate is the pure foundation:
//!
//! - **`apdu`** – The single "get UID" command sent to the reader and the
//!   parsing of the reply into data bytes plus the `SW1 SW2` status word.
//!
//! - **`domain`** – The [`Uid`] value (raw bytes rendered as uppercase hex)
//!   and the [`DedupeFilter`] state machine that suppresses repeated
//!   emission while the same card stays on the reader.
//!
//! - **`keymap`** – The symbolic keys a UID is typed with (`0`–`9`, `A`–`F`,
//!   terminators) and their translation to Linux evdev codes, X11 KeySyms,
//!   Windows Virtual Keys and macOS CGKeyCodes.

pub mod apdu;
pub mod domain;
pub mod keymap;

pub use apdu::{ApduError, ApduResponse, StatusWord, GET_UID_COMMAND};
pub use domain::dedupe::{DedupeFilter, DedupeState};
pub use domain::uid::Uid;
pub use keymap::hid::HidKeyCode;
pub use keymap::Terminator;
