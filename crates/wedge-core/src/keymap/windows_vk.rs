//! HID Usage ID to Windows Virtual Key (VK) code translation.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).
//!
//! # What is a Windows Virtual Key (VK) code? (for beginners)
//!
//! Windows assigns each keyboard key a number called a "Virtual Key code".
//! The digit and letter keys reuse their ASCII value (`'0'` = 0x30,
//! `'A'` = 0x41); control keys have named constants such as
//! `VK_RETURN = 0x0D`.

use super::hid::HidKeyCode;

/// Translates a [`HidKeyCode`] to a Windows Virtual Key code.
pub fn hid_to_vk(hid: HidKeyCode) -> u8 {
    match hid {
        HidKeyCode::KeyA => 0x41,
        HidKeyCode::KeyB => 0x42,
        HidKeyCode::KeyC => 0x43,
        HidKeyCode::KeyD => 0x44,
        HidKeyCode::KeyE => 0x45,
        HidKeyCode::KeyF => 0x46,

        HidKeyCode::Digit0 => 0x30,
        HidKeyCode::Digit1 => 0x31,
        HidKeyCode::Digit2 => 0x32,
        HidKeyCode::Digit3 => 0x33,
        HidKeyCode::Digit4 => 0x34,
        HidKeyCode::Digit5 => 0x35,
        HidKeyCode::Digit6 => 0x36,
        HidKeyCode::Digit7 => 0x37,
        HidKeyCode::Digit8 => 0x38,
        HidKeyCode::Digit9 => 0x39,

        HidKeyCode::Enter => 0x0D, // VK_RETURN
        HidKeyCode::Tab => 0x09,   // VK_TAB
    }
}
