//! APDU command and response types for the "get UID" exchange.
//!
//! nfc-wedge speaks exactly one command to the reader. Every reply is a
//! sequence of data bytes terminated by the two status bytes `SW1 SW2`.

pub mod command;
pub mod response;

pub use command::GET_UID_COMMAND;
pub use response::{ApduError, ApduResponse, StatusWord};
