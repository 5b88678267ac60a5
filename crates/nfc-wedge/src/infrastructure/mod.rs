//! Infrastructure layer for the wedge.
//!
//! Contains OS-facing adapters: the PC/SC card reader, the key injection
//! APIs, and configuration file loading.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `wedge_core`, but MUST NOT be imported by the `application` or domain
//! layers.
//!
//! # Sub-modules
//!
//! - **`reader`** – `PcscReader`, the `CardReader` implementation backed by
//!   the PC/SC service, plus a `ScriptedReader` for tests.
//!
//! - **`key_injection`** – OS-specific implementations of
//!   `PlatformKeyInjector`, selected at compile time using
//!   `#[cfg(target_os)]`, the console sink, and `build_sink` which picks one
//!   from the configuration.  A `RecordingInjector` is also provided for tests.
//!
//! - **`storage`** – The optional TOML configuration file.

pub mod key_injection;
pub mod reader;
pub mod storage;
