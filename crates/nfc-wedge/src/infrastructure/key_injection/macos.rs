//! macOS key injection via CoreGraphics (Quartz Event Services).
//!
//! `CGEvent::new_keyboard_event` builds a key event from a virtual key code
//! (`kVK_*`) and `post(CGEventTapLocation::HID)` injects it at the HID level,
//! before any application sees it.
//!
//! # Permissions
//!
//! The binary (or the terminal running it) must be granted *Accessibility*
//! access in System Settings → Privacy & Security; otherwise the events are
//! silently dropped.

#![cfg(target_os = "macos")]

use core_graphics::event::{CGEvent, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use wedge_core::keymap::{HidKeyCode, KeyMapper};

use crate::application::emit_uid::{InjectionError, PlatformKeyInjector};

/// macOS CoreGraphics key injector.
pub struct MacosInjector {
    source: CGEventSource,
}

impl MacosInjector {
    /// # Errors
    ///
    /// Returns `InjectionError::Unavailable` if no HID event source can be
    /// created.
    pub fn new() -> Result<Self, InjectionError> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|_| InjectionError::Unavailable("cannot create CGEventSource".into()))?;
        Ok(Self { source })
    }

    fn post_key(&self, key: HidKeyCode, key_down: bool) -> Result<(), InjectionError> {
        let keycode = KeyMapper::hid_to_macos_cgkeycode(key);
        let event = CGEvent::new_keyboard_event(self.source.clone(), keycode, key_down)
            .map_err(|_| InjectionError::Platform(format!("cannot create event for {key:?}")))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }
}

impl PlatformKeyInjector for MacosInjector {
    fn key_down(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.post_key(key, true)
    }

    fn key_up(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.post_key(key, false)
    }

    /// Posted events are already queued in order.
    fn sync(&mut self) -> Result<(), InjectionError> {
        Ok(())
    }
}
