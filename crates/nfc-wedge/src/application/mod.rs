//! Application layer use cases for the wedge.
//!
//! # What use cases does the wedge have?
//!
//! - **`read_card`** – One reader transaction: connect, send the "get UID"
//!   APDU, classify the reply, disconnect.  The reader is reached through the
//!   `CardReader` trait so the PC/SC driver can be swapped for a test double.
//!
//! - **`emit_uid`** – Turns a UID into key presses.  The OS call is made by a
//!   `PlatformKeyInjector` implementation that is injected at construction
//!   time; the `UidSink` trait lets a console printer stand in for the
//!   keyboard.
//!
//! - **`poll_loop`** – The `EmitLoop` that ties the two together: it polls
//!   at a fixed interval, suppresses repeated reads of the same card and
//!   forwards every new UID to the sink.

pub mod emit_uid;
pub mod poll_loop;
pub mod read_card;
