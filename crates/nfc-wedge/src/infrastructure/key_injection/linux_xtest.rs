//! Linux X11 key injection via the XTest extension.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize keyboard
//! events as if the user had pressed the physical keys.  The events go to the
//! focused window exactly like real input.
//!
//! `XTestFakeKeyEvent` takes an X11 *keycode* (a server-assigned key number),
//! not a KeySym, so every key goes through two lookups:
//!
//! ```text
//! HID Usage ID → X11 KeySym → XKeysymToKeycode(display, keysym) → X11 keycode
//! ```
//!
//! # Permissions
//!
//! The process needs access to the X display named by `DISPLAY`.  Under a
//! pure Wayland session use the `uinput` backend instead.

#![cfg(target_os = "linux")]

use std::os::raw::{c_int, c_uint, c_ulong};
use std::ptr::{self, NonNull};

use wedge_core::keymap::{HidKeyCode, KeyMapper};
use x11::{xlib, xtest};

use crate::application::emit_uid::{InjectionError, PlatformKeyInjector};

/// `CurrentTime`: deliver the event immediately.
const CURRENT_TIME: c_ulong = 0;

/// Linux X11/XTest key injector.
///
/// Holds the display connection for its whole lifetime; the connection is
/// closed on drop.  The raw display pointer makes this type `!Send`, so the
/// injector must be created on the thread that uses it.
pub struct XTestInjector {
    display: NonNull<xlib::Display>,
}

impl XTestInjector {
    /// Opens the display named by `DISPLAY` and checks for XTest.
    ///
    /// # Errors
    ///
    /// Returns `InjectionError::Unavailable` if the display cannot be opened
    /// or the server lacks the XTest extension.
    pub fn new() -> Result<Self, InjectionError> {
        // SAFETY: a null name selects the display from the environment.
        let raw = unsafe { xlib::XOpenDisplay(ptr::null()) };
        let display = NonNull::new(raw).ok_or_else(|| {
            InjectionError::Unavailable("cannot open X display (is DISPLAY set?)".into())
        })?;
        let injector = Self { display };

        let (mut event_base, mut error_base, mut major, mut minor) = (0, 0, 0, 0);
        // SAFETY: the display pointer is valid until `drop`.
        let has_xtest = unsafe {
            xtest::XTestQueryExtension(
                injector.display.as_ptr(),
                &mut event_base,
                &mut error_base,
                &mut major,
                &mut minor,
            )
        };
        if has_xtest == 0 {
            return Err(InjectionError::Unavailable(
                "X server does not support the XTest extension".into(),
            ));
        }
        tracing::debug!(major, minor, "XTest extension available");
        Ok(injector)
    }

    fn keycode(&self, key: HidKeyCode) -> Result<c_uint, InjectionError> {
        let keysym = KeyMapper::hid_to_x11_keysym(key);
        // SAFETY: the display pointer is valid until `drop`.
        let keycode =
            unsafe { xlib::XKeysymToKeycode(self.display.as_ptr(), keysym as xlib::KeySym) };
        if keycode == 0 {
            return Err(InjectionError::Platform(format!(
                "no keycode for keysym {keysym:#06x} ({key:?})"
            )));
        }
        Ok(c_uint::from(keycode))
    }

    fn fake_key(&mut self, key: HidKeyCode, is_press: bool) -> Result<(), InjectionError> {
        let keycode = self.keycode(key)?;
        // SAFETY: the display pointer is valid until `drop`.
        let ok = unsafe {
            xtest::XTestFakeKeyEvent(
                self.display.as_ptr(),
                keycode,
                c_int::from(is_press),
                CURRENT_TIME,
            )
        };
        if ok == 0 {
            return Err(InjectionError::Platform(format!(
                "XTestFakeKeyEvent failed for {key:?}"
            )));
        }
        Ok(())
    }
}

impl PlatformKeyInjector for XTestInjector {
    fn key_down(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.fake_key(key, true)
    }

    fn key_up(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.fake_key(key, false)
    }

    fn sync(&mut self) -> Result<(), InjectionError> {
        // SAFETY: the display pointer is valid until `drop`.
        unsafe { xlib::XSync(self.display.as_ptr(), xlib::False) };
        Ok(())
    }
}

impl Drop for XTestInjector {
    fn drop(&mut self) {
        // SAFETY: the pointer came from XOpenDisplay and is closed exactly once.
        unsafe { xlib::XCloseDisplay(self.display.as_ptr()) };
    }
}
