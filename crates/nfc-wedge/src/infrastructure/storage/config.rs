//! TOML-based configuration for the wedge.
//!
//! Reads `AppConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\NfcWedge\config.toml`
//! - Linux:    `~/.config/nfc-wedge/config.toml` (or `$XDG_CONFIG_HOME/nfc-wedge/`)
//! - macOS:    `~/Library/Application Support/NfcWedge/config.toml`
//!
//! The file is optional.  Every field has a default, so a missing file, a
//! missing section or a missing key all fall back to the built-in values:
//!
//! ```toml
//! [reader]
//! name_filter = "RC-S300"
//! poll_interval_ms = 500
//!
//! [output]
//! backend = "keyboard"
//! inter_key_delay_ms = 50
//! terminator = "enter"
//! startup_delay_ms = 0
//!
//! [logging]
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wedge_core::Terminator;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Where a UID goes once it is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Native OS key injection: XTest on Linux, `SendInput` on Windows,
    /// CoreGraphics on macOS.
    ///
    /// Hex letters are pressed as unshifted keys, so the focused application
    /// receives lowercase text (`04a1b2c3`) while [`Backend::Console`] prints
    /// the uppercase UID (`04A1B2C3`).  The same holds for [`Backend::Uinput`].
    /// Compare UIDs case-insensitively on the receiving side.
    #[default]
    Keyboard,
    /// Linux uinput virtual keyboard (works under Wayland and on the console).
    Uinput,
    /// Print each UID on stdout.
    Console,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reader selection and polling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReaderConfig {
    /// Use the first reader whose name contains this text.  When absent, the
    /// first enumerated reader is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_filter: Option<String>,
    /// Pause between two polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// How UIDs are emitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub backend: Backend,
    /// Pause after each typed character, in milliseconds.
    #[serde(default = "default_inter_key_delay_ms")]
    pub inter_key_delay_ms: u64,
    /// Key pressed after the UID.
    #[serde(default)]
    pub terminator: Terminator,
    /// Wait before the first poll, to give the operator time to focus the
    /// target field.
    #[serde(default)]
    pub startup_delay_ms: u64,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset: `"error"`, `"warn"`,
    /// `"info"`, `"debug"`, `"trace"` or a full directive list.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_poll_interval_ms() -> u64 {
    500
}
fn default_inter_key_delay_ms() -> u64 {
    50
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            name_filter: None,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            inter_key_delay_ms: default_inter_key_delay_ms(),
            terminator: Terminator::default(),
            startup_delay_ms: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ReaderConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl OutputConfig {
    pub fn inter_key_delay(&self) -> Duration {
        Duration::from_millis(self.inter_key_delay_ms)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }
}

impl AppConfig {
    /// Checks values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reader.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "reader.poll_interval_ms must be at least 1".into(),
            ));
        }
        if let Some(filter) = &self.reader.name_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "reader.name_filter must not be empty".into(),
                ));
            }
        }
        if self.logging.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.log_level must not be empty".into()));
        }
        Ok(())
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Parses and validates a config from TOML text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let cfg: AppConfig = toml::from_str(content)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Loads the configuration.
///
/// With `explicit = Some(path)` the file must exist.  Otherwise the default
/// location is tried, and a missing file (or an undeterminable config
/// directory) yields `AppConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors, [`ConfigError::Parse`]
/// if the TOML is malformed and [`ConfigError::Invalid`] for out-of-range
/// values.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return parse_config(&content);
    }

    let path = match config_file_path() {
        Ok(path) => path,
        Err(ConfigError::NoPlatformConfigDir) => return Ok(AppConfig::default()),
        Err(e) => return Err(e),
    };
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Resolves the platform config base directory including the `nfc-wedge`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("NfcWedge"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("nfc-wedge"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("NfcWedge")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nfc_wedge_{name}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_config_default_values() {
        // Arrange / Act
        let cfg = AppConfig::default();

        // Assert
        assert_eq!(cfg.reader.name_filter, None);
        assert_eq!(cfg.reader.poll_interval(), Duration::from_millis(500));
        assert_eq!(cfg.output.backend, Backend::Keyboard);
        assert_eq!(cfg.output.inter_key_delay(), Duration::from_millis(50));
        assert_eq!(cfg.output.terminator, Terminator::Enter);
        assert_eq!(cfg.output.startup_delay(), Duration::ZERO);
        assert_eq!(cfg.logging.log_level, "info");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    // ── Parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_document_overrides_only_given_keys() {
        // Arrange
        let toml_str = r#"
[reader]
name_filter = "RC-S300"

[output]
backend = "console"
terminator = "tab"
"#;

        // Act
        let cfg = parse_config(toml_str).unwrap();

        // Assert
        assert_eq!(cfg.reader.name_filter.as_deref(), Some("RC-S300"));
        assert_eq!(cfg.reader.poll_interval_ms, 500);
        assert_eq!(cfg.output.backend, Backend::Console);
        assert_eq!(cfg.output.terminator, Terminator::Tab);
        assert_eq!(cfg.output.inter_key_delay_ms, 50);
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        let result = parse_config("[output]\nbackend = \"bluetooth\"\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        assert!(matches!(
            parse_config("[[[ not valid toml"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let result = parse_config("[reader]\npoll_interval_ms = 0\n");

        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("poll_interval_ms")));
    }

    #[test]
    fn test_blank_name_filter_is_rejected() {
        assert!(matches!(
            parse_config("[reader]\nname_filter = \"  \"\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        // Arrange
        let mut cfg = AppConfig::default();
        cfg.reader.name_filter = Some("ACR122".into());
        cfg.output.backend = Backend::Uinput;
        cfg.output.terminator = Terminator::None;

        // Act
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let restored = parse_config(&toml_str).expect("deserialize");

        // Assert
        assert_eq!(cfg, restored);
    }

    // ── load_config ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_explicit_file() {
        // Arrange
        let dir = temp_dir("explicit");
        let path = dir.join("config.toml");
        std::fs::write(&path, "[output]\ninter_key_delay_ms = 5\n").unwrap();

        // Act
        let cfg = load_config(Some(&path)).unwrap();

        // Assert
        assert_eq!(cfg.output.inter_key_delay_ms, 5);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_explicit_file_is_io_error() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/config.toml");

        let result = load_config(Some(&path));

        assert!(matches!(result, Err(ConfigError::Io { path: p, .. }) if p == path));
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(
                path.ends_with("config.toml"),
                "config file must be named config.toml, got {path:?}"
            );
        }
    }
}
