//! Linux key injection through a uinput virtual keyboard.
//!
//! The kernel's uinput module lets a process create an input device and
//! write key events into it.  Those events pass through the normal input
//! stack, so they reach X11, Wayland compositors and text consoles alike.
//!
//! Creating the device needs write access to `/dev/uinput` (root, or a udev
//! rule granting the `input` group access).

#![cfg(target_os = "linux")]

use std::thread;
use std::time::Duration;

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, EventType, InputEvent, Key};
use wedge_core::keymap::{HidKeyCode, KeyMapper};

use crate::application::emit_uid::{InjectionError, PlatformKeyInjector};

/// Name the virtual keyboard is registered under.
pub const DEVICE_NAME: &str = "nfc-wedge virtual keyboard";

/// Time for the compositor to pick up a freshly created device.
const SETTLE_TIME: Duration = Duration::from_millis(200);

const KEY_PRESSED: i32 = 1;
const KEY_RELEASED: i32 = 0;

/// Key injector writing to a uinput virtual keyboard.
///
/// Events are buffered by `key_down`/`key_up` and written, followed by a
/// `SYN_REPORT`, on `sync`.
pub struct UinputInjector {
    device: VirtualDevice,
    pending: Vec<InputEvent>,
}

impl UinputInjector {
    /// Creates the virtual keyboard with exactly the keys a UID needs.
    ///
    /// # Errors
    ///
    /// Returns `InjectionError::Unavailable` if `/dev/uinput` cannot be
    /// opened or the device cannot be registered.
    pub fn new() -> Result<Self, InjectionError> {
        let mut keys = AttributeSet::<Key>::new();
        for hid in HidKeyCode::ALL {
            keys.insert(Key::new(KeyMapper::hid_to_evdev(hid)));
        }

        let device = VirtualDeviceBuilder::new()
            .and_then(|b| b.name(DEVICE_NAME).with_keys(&keys))
            .and_then(|b| b.build())
            .map_err(|e| InjectionError::Unavailable(format!("cannot create uinput device: {e}")))?;
        tracing::debug!(name = DEVICE_NAME, "uinput device created");
        thread::sleep(SETTLE_TIME);

        Ok(Self {
            device,
            pending: Vec::with_capacity(4),
        })
    }

    fn queue(&mut self, key: HidKeyCode, value: i32) {
        let code = KeyMapper::hid_to_evdev(key);
        self.pending.push(InputEvent::new(EventType::KEY, code, value));
    }
}

impl PlatformKeyInjector for UinputInjector {
    fn key_down(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.queue(key, KEY_PRESSED);
        Ok(())
    }

    fn key_up(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.queue(key, KEY_RELEASED);
        Ok(())
    }

    fn sync(&mut self) -> Result<(), InjectionError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        // `emit` appends the SYN_REPORT.
        let result = self.device.emit(&self.pending);
        self.pending.clear();
        result?;
        Ok(())
    }
}
