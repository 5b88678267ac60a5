//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module handles:
//!
//! - Locating the TOML configuration file in the platform-appropriate directory.
//! - Reading it, or an explicit file given on the command line.
//! - Providing defaults for every setting, so the wedge runs with no file at all.

pub mod config;
