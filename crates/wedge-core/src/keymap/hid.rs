//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page) for the keys a UID is
//! typed with.
//!
//! This is the canonical cross-platform key representation used throughout
//! nfc-wedge.  Every injection backend translates from HID to its own code
//! space at the last moment.
//!
//! Reference: USB HID Usage Tables 1.3, Section 10 (Keyboard/Keypad page 0x07).
//!
//! # What is a HID Usage ID? (for beginners)
//!
//! The **USB Human Interface Device (HID)** standard assigns a unique number to
//! every key on a keyboard.  These numbers are called *Usage IDs*:
//!
//! | Key          | HID Usage ID |
//! |--------------|-------------|
//! | Letter A     | 0x04        |
//! | Digit 1      | 0x1E        |
//! | Digit 0      | 0x27        |
//! | Enter        | 0x28        |
//!
//! HID codes represent **physical key positions**, not characters.  A UID
//! rendered as `04A1` is typed by pressing the keys at positions `Digit0`,
//! `Digit4`, `KeyA`, `Digit1`.
//!
//! Only the sixteen hexadecimal digits plus the terminator keys are modelled;
//! nothing else is ever typed.

use serde::{Deserialize, Serialize};

/// USB HID Usage ID for the keys nfc-wedge types (page 0x07).
///
/// The numeric value of each variant is its HID Usage ID on the keyboard/keypad page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum HidKeyCode {
    // Hex letters (HID 0x04–0x09)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,

    // Digits (HID 0x1E–0x27)
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Terminators
    Enter = 0x28,
    Tab = 0x2B,
}

impl HidKeyCode {
    /// Every key in the table, in HID order.
    pub const ALL: [Self; 18] = [
        Self::KeyA,
        Self::KeyB,
        Self::KeyC,
        Self::KeyD,
        Self::KeyE,
        Self::KeyF,
        Self::Digit1,
        Self::Digit2,
        Self::Digit3,
        Self::Digit4,
        Self::Digit5,
        Self::Digit6,
        Self::Digit7,
        Self::Digit8,
        Self::Digit9,
        Self::Digit0,
        Self::Enter,
        Self::Tab,
    ];

    /// Maps a hexadecimal digit character to the key that types it.
    ///
    /// Lowercase `a`–`f` map to the same keys as uppercase.  Returns `None`
    /// for anything else (separators, spaces, …).
    pub fn from_hex_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            '0' => Some(Self::Digit0),
            '1' => Some(Self::Digit1),
            '2' => Some(Self::Digit2),
            '3' => Some(Self::Digit3),
            '4' => Some(Self::Digit4),
            '5' => Some(Self::Digit5),
            '6' => Some(Self::Digit6),
            '7' => Some(Self::Digit7),
            '8' => Some(Self::Digit8),
            '9' => Some(Self::Digit9),
            'A' => Some(Self::KeyA),
            'B' => Some(Self::KeyB),
            'C' => Some(Self::KeyC),
            'D' => Some(Self::KeyD),
            'E' => Some(Self::KeyE),
            'F' => Some(Self::KeyF),
            _ => None,
        }
    }

    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns `true` for the keys that can end a UID (`Enter`, `Tab`).
    pub const fn is_terminator(self) -> bool {
        matches!(self, Self::Enter | Self::Tab)
    }
}
