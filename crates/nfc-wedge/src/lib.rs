//! nfc-wedge library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does nfc-wedge do? (for beginners)
//!
//! A *keyboard wedge* is a device that types what it reads.  Barcode
//! scanners commonly work this way; nfc-wedge turns an ordinary PC/SC
//! contactless reader into one:
//!
//! 1. Every `poll_interval` it asks the reader for the UID of the card in its
//!    field (APDU `FF CA 00 00 00`).
//! 2. A reply ending in status `90 00` carries the UID, which is rendered as
//!    uppercase hex (`04A1B2C3`).
//! 3. If that UID is not the one already on the reader, each hex character is
//!    typed into the focused application, followed by Enter.
//! 4. Any poll that comes back without a UID means the card is gone, so the
//!    same card placed again later is typed again.
//!
//! This makes attendance, kiosk and access-control forms work with a card
//! reader without any reader integration on their side.

/// Application layer: reader session, UID emission and the poll loop.
pub mod application;

/// Infrastructure layer: PC/SC reader, key injectors and configuration.
pub mod infrastructure;
