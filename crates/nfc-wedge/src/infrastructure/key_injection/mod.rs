//! Platform-specific key injection and sink construction.
//!
//! The native injector is selected at compile time via
//! `#[cfg(target_os = ...)]`; the backend (native keyboard, uinput or
//! console) is selected at run time from [`OutputConfig::backend`].

pub mod console;
pub mod mock;

#[cfg(target_os = "linux")]
pub mod linux_uinput;
#[cfg(target_os = "linux")]
pub mod linux_xtest;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub mod macos;

use tracing::info;

use crate::application::emit_uid::{
    InjectionError, KeystrokeSink, PlatformKeyInjector, UidSink,
};
use crate::infrastructure::storage::config::{Backend, OutputConfig};

/// Opens the OS-native keyboard injector for this platform.
///
/// # Errors
///
/// Returns `InjectionError::Unavailable` if the injector cannot be opened
/// (no X display, no event source) or the platform has none.
pub fn native_injector() -> Result<Box<dyn PlatformKeyInjector>, InjectionError> {
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(linux_xtest::XTestInjector::new()?))
    }

    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(windows::WindowsInjector::new()))
    }

    #[cfg(target_os = "macos")]
    {
        Ok(Box::new(macos::MacosInjector::new()?))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        Err(InjectionError::Unavailable(
            "no native keyboard injector for this platform".into(),
        ))
    }
}

/// Opens the uinput virtual keyboard (Linux only).
///
/// # Errors
///
/// Returns `InjectionError::Unavailable` when `/dev/uinput` is not usable or
/// on other platforms.
pub fn uinput_injector() -> Result<Box<dyn PlatformKeyInjector>, InjectionError> {
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(linux_uinput::UinputInjector::new()?))
    }

    #[cfg(not(target_os = "linux"))]
    {
        Err(InjectionError::Unavailable(
            "the uinput backend is only available on Linux".into(),
        ))
    }
}

/// Builds the sink selected by `config.backend`.
///
/// Must be called on the thread that runs the poll loop: the native
/// injectors hold thread-bound OS handles.
///
/// # Errors
///
/// Returns the injector's [`InjectionError`] if the backend cannot be opened.
pub fn build_sink(config: &OutputConfig) -> Result<Box<dyn UidSink>, InjectionError> {
    let injector = match config.backend {
        Backend::Console => {
            info!(backend = "console", "printing UIDs to stdout");
            return Ok(Box::new(console::ConsoleSink::stdout()));
        }
        Backend::Keyboard => native_injector()?,
        Backend::Uinput => uinput_injector()?,
    };
    info!(
        backend = ?config.backend,
        terminator = ?config.terminator,
        inter_key_delay_ms = config.inter_key_delay_ms,
        "typing UIDs"
    );
    Ok(Box::new(KeystrokeSink::new(
        injector,
        config.inter_key_delay(),
        config.terminator,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_backend_needs_no_os_access() {
        let config = OutputConfig {
            backend: Backend::Console,
            ..OutputConfig::default()
        };

        assert!(build_sink(&config).is_ok());
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_uinput_backend_unavailable_off_linux() {
        assert!(matches!(
            uinput_injector(),
            Err(InjectionError::Unavailable(_))
        ));
    }
}
