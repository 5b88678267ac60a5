//! HID Usage ID to Linux evdev key code translation for the uinput backend.
//!
//! Values come from `linux/input-event-codes.h`.  Unlike HID, the kernel
//! numbers keys by their position on an IBM PC/AT keyboard, which is why the
//! letters are scattered (`KEY_A = 30`, `KEY_B = 48`).

use super::hid::HidKeyCode;

/// Translates a [`HidKeyCode`] to a `KEY_*` code from `input-event-codes.h`.
pub fn hid_to_evdev(hid: HidKeyCode) -> u16 {
    match hid {
        HidKeyCode::KeyA => 30, // KEY_A
        HidKeyCode::KeyB => 48, // KEY_B
        HidKeyCode::KeyC => 46, // KEY_C
        HidKeyCode::KeyD => 32, // KEY_D
        HidKeyCode::KeyE => 18, // KEY_E
        HidKeyCode::KeyF => 33, // KEY_F

        HidKeyCode::Digit1 => 2, // KEY_1
        HidKeyCode::Digit2 => 3,
        HidKeyCode::Digit3 => 4,
        HidKeyCode::Digit4 => 5,
        HidKeyCode::Digit5 => 6,
        HidKeyCode::Digit6 => 7,
        HidKeyCode::Digit7 => 8,
        HidKeyCode::Digit8 => 9,
        HidKeyCode::Digit9 => 10,
        HidKeyCode::Digit0 => 11, // KEY_0

        HidKeyCode::Enter => 28, // KEY_ENTER
        HidKeyCode::Tab => 15,   // KEY_TAB
    }
}
