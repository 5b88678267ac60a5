//! Recording key injector for unit and integration tests.
//!
//! # Why a recording injector?
//!
//! The real injectors (`XTestInjector`, `UinputInjector`, `WindowsInjector`,
//! `MacosInjector`) press keys on the machine running the tests and need a
//! desktop session or device permissions.  The [`RecordingInjector`] replaces
//! every OS call with a push onto an in-memory list, so assertions can check
//! exactly which events were produced and in what order.
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every call return
//! `InjectionError::Platform`, which exercises the fatal sink path without a
//! broken OS.

use wedge_core::HidKeyCode;

use crate::application::emit_uid::{InjectionError, PlatformKeyInjector};

/// One recorded injector call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down(HidKeyCode),
    Up(HidKeyCode),
    Sync,
}

/// An injector that records every call instead of touching the OS.
#[derive(Debug, Default)]
pub struct RecordingInjector {
    /// Every call, in order.
    pub actions: Vec<KeyAction>,
    /// When `true`, every method returns `InjectionError::Platform`.
    pub should_fail: bool,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// An injector whose every call fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Keys in the order they were pressed down.
    pub fn pressed_keys(&self) -> Vec<HidKeyCode> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                KeyAction::Down(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    /// Number of `sync` calls.
    pub fn sync_count(&self) -> usize {
        self.actions.iter().filter(|a| **a == KeyAction::Sync).count()
    }

    fn record(&mut self, action: KeyAction) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        self.actions.push(action);
        Ok(())
    }
}

impl PlatformKeyInjector for RecordingInjector {
    fn key_down(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.record(KeyAction::Down(key))
    }

    fn key_up(&mut self, key: HidKeyCode) -> Result<(), InjectionError> {
        self.record(KeyAction::Up(key))
    }

    fn sync(&mut self) -> Result<(), InjectionError> {
        self.record(KeyAction::Sync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_records_down_up_sync() {
        // Arrange
        let mut injector = RecordingInjector::new();

        // Act
        injector.press(HidKeyCode::KeyA).unwrap();

        // Assert
        assert_eq!(
            injector.actions,
            vec![
                KeyAction::Down(HidKeyCode::KeyA),
                KeyAction::Up(HidKeyCode::KeyA),
                KeyAction::Sync
            ]
        );
    }

    #[test]
    fn test_failing_injector_records_nothing() {
        let mut injector = RecordingInjector::failing();

        assert!(injector.press(HidKeyCode::Enter).is_err());
        assert!(injector.actions.is_empty());
    }
}
