//! The fixed "get UID" pseudo-APDU.
//!
//! # What is a pseudo-APDU? (for beginners)
//!
//! Smartcards are driven with APDUs (Application Protocol Data Units): a class
//! byte (`CLA`), an instruction byte (`INS`), two parameters (`P1`, `P2`) and
//! an expected length (`Le`).  Class `0xFF` is reserved by the PC/SC Part 3
//! specification for commands that are answered by the *reader* itself rather
//! than forwarded to the card.
//!
//! `FF CA 00 00 00` is the PC/SC "GET DATA" command:
//!
//! | Byte | Value | Meaning                                  |
//! |------|-------|------------------------------------------|
//! | CLA  | 0xFF  | reader-handled pseudo-APDU               |
//! | INS  | 0xCA  | GET DATA                                 |
//! | P1   | 0x00  | return the UID (ISO 14443) / IDm (FeliCa)|
//! | P2   | 0x00  | unused                                   |
//! | Le   | 0x00  | return all available bytes               |
//!
//! No authentication with the card is needed, which is what makes this
//! command work across MIFARE, NTAG, FeliCa and most other contactless cards.

/// Length of [`GET_UID_COMMAND`] in bytes.
pub const GET_UID_COMMAND_LEN: usize = 5;

/// The PC/SC "GET DATA" command that asks the reader for the card UID.
pub const GET_UID_COMMAND: [u8; GET_UID_COMMAND_LEN] = [0xFF, 0xCA, 0x00, 0x00, 0x00];
