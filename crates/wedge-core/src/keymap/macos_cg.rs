//! HID Usage ID to macOS CGKeyCode translation table.
//!
//! CGKeyCode values are defined in Carbon Events.h (HIToolbox framework).
//! macOS numbers keys by ANSI layout position, so neither digits nor letters
//! are contiguous.

use super::hid::HidKeyCode;

/// Translates a [`HidKeyCode`] to a macOS `CGKeyCode` value.
pub fn hid_to_cgkeycode(hid: HidKeyCode) -> u16 {
    match hid {
        HidKeyCode::KeyA => 0x00, // kVK_ANSI_A
        HidKeyCode::KeyB => 0x0B, // kVK_ANSI_B
        HidKeyCode::KeyC => 0x08, // kVK_ANSI_C
        HidKeyCode::KeyD => 0x02, // kVK_ANSI_D
        HidKeyCode::KeyE => 0x0E, // kVK_ANSI_E
        HidKeyCode::KeyF => 0x03, // kVK_ANSI_F

        HidKeyCode::Digit0 => 0x1D, // kVK_ANSI_0
        HidKeyCode::Digit1 => 0x12, // kVK_ANSI_1
        HidKeyCode::Digit2 => 0x13, // kVK_ANSI_2
        HidKeyCode::Digit3 => 0x14, // kVK_ANSI_3
        HidKeyCode::Digit4 => 0x15, // kVK_ANSI_4
        HidKeyCode::Digit5 => 0x17, // kVK_ANSI_5
        HidKeyCode::Digit6 => 0x16, // kVK_ANSI_6
        HidKeyCode::Digit7 => 0x1A, // kVK_ANSI_7
        HidKeyCode::Digit8 => 0x1C, // kVK_ANSI_8
        HidKeyCode::Digit9 => 0x19, // kVK_ANSI_9

        HidKeyCode::Enter => 0x24, // kVK_Return
        HidKeyCode::Tab => 0x30,   // kVK_Tab
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_key_has_a_distinct_cgkeycode() {
        let codes: HashSet<u16> = HidKeyCode::ALL.into_iter().map(hid_to_cgkeycode).collect();
        assert_eq!(codes.len(), HidKeyCode::ALL.len());
    }

    #[test]
    fn test_return_key_code() {
        assert_eq!(hid_to_cgkeycode(HidKeyCode::Enter), 0x24);
    }
}
