//! Key code translation tables for typing a UID on every platform.
//!
//! The canonical representation is USB HID Usage IDs (page 0x07, Keyboard/Keypad).
//! Platform-specific codes are produced at the injection boundary.

pub mod hid;
pub mod linux_evdev;
pub mod linux_x11;
pub mod macos_cg;
pub mod windows_vk;

use serde::{Deserialize, Serialize};

pub use hid::HidKeyCode;

/// Unified key mapper providing all translation directions.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a [`HidKeyCode`] to a Windows Virtual Key code.
    pub fn hid_to_windows_vk(hid: HidKeyCode) -> u8 {
        windows_vk::hid_to_vk(hid)
    }

    /// Translates a [`HidKeyCode`] to an X11 KeySym value for XTest.
    pub fn hid_to_x11_keysym(hid: HidKeyCode) -> u32 {
        linux_x11::hid_to_keysym(hid)
    }

    /// Translates a [`HidKeyCode`] to a Linux `KEY_*` code for uinput.
    pub fn hid_to_evdev(hid: HidKeyCode) -> u16 {
        linux_evdev::hid_to_evdev(hid)
    }

    /// Translates a [`HidKeyCode`] to a macOS `CGKeyCode` value.
    pub fn hid_to_macos_cgkeycode(hid: HidKeyCode) -> u16 {
        macos_cg::hid_to_cgkeycode(hid)
    }
}

/// Key pressed after the last UID character so the receiving form submits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminator {
    #[default]
    Enter,
    Tab,
    /// Type the UID only.
    None,
}

impl Terminator {
    pub const fn key(self) -> Option<HidKeyCode> {
        match self {
            Self::Enter => Some(HidKeyCode::Enter),
            Self::Tab => Some(HidKeyCode::Tab),
            Self::None => None,
        }
    }
}

/// Returns the keys that type `uid_hex` followed by `terminator`.
///
/// Characters outside `[0-9A-Fa-f]` are skipped so reader-specific
/// separators do not abort an emission.
pub fn keystrokes_for(uid_hex: &str, terminator: Terminator) -> Vec<HidKeyCode> {
    uid_hex
        .chars()
        .filter_map(|c| {
            let key = HidKeyCode::from_hex_char(c);
            if key.is_none() {
                tracing::trace!(character = ?c, "skipping non-hex character");
            }
            key
        })
        .chain(terminator.key())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::hid::HidKeyCode::*;

    #[test]
    fn test_keystrokes_for_uid_ends_with_enter() {
        assert_eq!(
            keystrokes_for("04A1B2C3", Terminator::Enter),
            vec![Digit0, Digit4, KeyA, Digit1, KeyB, Digit2, KeyC, Digit3, Enter]
        );
    }

    #[test]
    fn test_keystrokes_for_skips_separators() {
        assert_eq!(
            keystrokes_for("0A:1b 2", Terminator::Tab),
            vec![Digit0, KeyA, Digit1, KeyB, Digit2, Tab]
        );
    }

    #[test]
    fn test_keystrokes_for_without_terminator() {
        assert_eq!(keystrokes_for("FF", Terminator::None), vec![KeyF, KeyF]);
    }

    #[test]
    fn test_empty_uid_yields_terminator_only() {
        assert_eq!(keystrokes_for("", Terminator::Enter), vec![Enter]);
    }

    #[test]
    fn test_terminator_keys() {
        assert_eq!(Terminator::default(), Terminator::Enter);
        assert_eq!(Terminator::Enter.key(), Some(Enter));
        assert_eq!(Terminator::Tab.key(), Some(Tab));
        assert_eq!(Terminator::None.key(), None);
    }
}
