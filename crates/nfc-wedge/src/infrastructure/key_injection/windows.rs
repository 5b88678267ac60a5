//! Windows key injection via `SendInput`.
//!
//! # How Windows key injection works (for beginners)
//!
//! `SendInput` appends `INPUT` records to the system input queue.  Each
//! keyboard record carries a Virtual Key code (`VK_*`); a release is the same
//! record with `KEYEVENTF_KEYUP` set.  The OS then delivers the keys to the
//! foreground window as if they had been typed.
//!
//! `SendInput` returns the number of records it inserted.  Anything other
//! than `1` means the input was blocked (for example by UIPI when the
//! foreground window belongs to an elevated process).

#![cfg(target_os = "windows")]

use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP,
    VIRTUAL_KEY,
};
use wedge_core::keymap::{HidKeyCode, KeyMapper};

use crate::application::emit_uid::{InjectionError, PlatformKeyInjector};

/// Windows `SendInput` key injector.
#[derive(Debug, Default)]
pub struct WindowsInjector;

impl WindowsInjector {
    pub fn new() -> Self {
        Self
    }
}

fn send_key(vk: u8, key_up: bool) -> Result<(), InjectionError> {
    let flags = if key_up {
        KEYEVENTF_KEYUP
    } else {
        KEYBD_EVENT_FLAGS(0)
    };
    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(u16::from(vk)),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    // SAFETY: `input` is a fully initialised keyboard record.
    let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if sent != 1 {
        return Err(InjectionError::Platform(format!(
            "SendInput rejected VK {vk:#04x}: {}",
            windows::core::Error::from_win32()
        )));
    }
    Ok(())
}

impl PlatformKeyInjector for WindowsInjector {
    fn key_down(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        send_key(KeyMapper::hid_to_windows_vk(key), false)
    }

    fn key_up(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        send_key(KeyMapper::hid_to_windows_vk(key), true)
    }

    /// `SendInput` is synchronous; nothing to flush.
    fn sync(&mut self) -> Result<(), InjectionError> {
        Ok(())
    }
}
