//! HID Usage ID to X11 KeySym translation table for the XTest backend.
//!
//! X11 KeySym values are defined in X11/keysymdef.h.
//! Reference: https://gitlab.freedesktop.org/xorg/proto/xorgproto/-/blob/master/include/X11/keysymdef.h
//!
//! # What is an X11 KeySym? (for beginners)
//!
//! X11 identifies keys by **KeySym** (Key Symbol).  Printable keys use their
//! ASCII value, control keys live in the `0xFFxx` range:
//!
//! | KeySym name | Value  | Meaning        |
//! |-------------|--------|----------------|
//! | `XK_0`      | 0x0030 | digit zero     |
//! | `XK_a`      | 0x0061 | lowercase 'a'  |
//! | `XK_Return` | 0xFF0D | Enter key      |
//!
//! `XTestFakeKeyEvent` takes a hardware *keycode*, so the backend resolves
//! each KeySym with `XKeysymToKeycode` before injecting.
//!
//! Letters map to their lowercase KeySym: the keycode found for `XK_a` is the
//! physical A key, which is what a hardware keyboard wedge presses as well.

use super::hid::HidKeyCode;

/// Translates a [`HidKeyCode`] to an X11 KeySym value.
pub fn hid_to_keysym(hid: HidKeyCode) -> u32 {
    match hid {
        HidKeyCode::KeyA => 0x0061, // XK_a
        HidKeyCode::KeyB => 0x0062, // XK_b
        HidKeyCode::KeyC => 0x0063, // XK_c
        HidKeyCode::KeyD => 0x0064, // XK_d
        HidKeyCode::KeyE => 0x0065, // XK_e
        HidKeyCode::KeyF => 0x0066, // XK_f

        HidKeyCode::Digit0 => 0x0030, // XK_0
        HidKeyCode::Digit1 => 0x0031,
        HidKeyCode::Digit2 => 0x0032,
        HidKeyCode::Digit3 => 0x0033,
        HidKeyCode::Digit4 => 0x0034,
        HidKeyCode::Digit5 => 0x0035,
        HidKeyCode::Digit6 => 0x0036,
        HidKeyCode::Digit7 => 0x0037,
        HidKeyCode::Digit8 => 0x0038,
        HidKeyCode::Digit9 => 0x0039,

        HidKeyCode::Enter => 0xFF0D, // XK_Return
        HidKeyCode::Tab => 0xFF09,   // XK_Tab
    }
}
