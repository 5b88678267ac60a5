//! Card reader adapters implementing [`CardReader`](crate::application::read_card::CardReader).
//!
//! - **`pcsc_reader`** – The real reader, reached through the PC/SC service
//!   (pcsclite on Linux/macOS, WinSCard on Windows).
//! - **`mock`** – A scripted reader that replays canned replies, for tests.

pub mod mock;
pub mod pcsc_reader;
