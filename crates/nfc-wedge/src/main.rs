//! nfc-wedge entry point.
//!
//! Polls a contactless card reader and types each new card UID into the
//! focused application.
//!
//! # Usage
//!
//! ```text
//! nfc-wedge [OPTIONS]
//!
//! Options:
//!   --config <PATH>            Config file [env: NFC_WEDGE_CONFIG]
//!   --backend <BACKEND>        keyboard | uinput | console
//!   --reader <SUBSTRING>       Use the first reader whose name contains this
//!   --poll-interval-ms <MS>    Pause between polls
//!   --key-delay-ms <MS>        Pause after each typed character
//!   --startup-delay-ms <MS>    Wait before the first poll
//!   --list-readers             Print the attached readers and exit
//! ```
//!
//! With no options and no config file the first reader is used, UIDs are
//! typed through the native keyboard backend and the process runs until
//! Ctrl+C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config() + CLI overrides
//!  └─ PcscReaderManager::select()    -- fatal if no reader matches
//!  └─ spawn_blocking
//!       └─ build_sink()              -- injector lives on this thread
//!       └─ EmitLoop::run()           -- until Ctrl+C or a sink failure
//! ```

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt::MakeWriter, util::SubscriberInitExt, EnvFilter};

use nfc_wedge::application::poll_loop::EmitLoop;
use nfc_wedge::infrastructure::{
    key_injection::build_sink,
    reader::pcsc_reader::PcscReaderManager,
    storage::config::{load_config, AppConfig, Backend},
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// NFC keyboard wedge.
///
/// Types the UID of every card placed on a PC/SC contactless reader into the
/// focused application, followed by Enter.
#[derive(Debug, Parser)]
#[command(name = "nfc-wedge", version, about)]
struct Cli {
    /// Path to a TOML config file.  Defaults to the platform config directory;
    /// a missing default file is not an error.
    #[arg(long, env = "NFC_WEDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Where UIDs go: native keyboard, Linux uinput device, or stdout.
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// Use the first reader whose name contains this text.
    #[arg(long, value_name = "SUBSTRING")]
    reader: Option<String>,

    /// Pause between two polls, in milliseconds.
    #[arg(long, value_name = "MS")]
    poll_interval_ms: Option<u64>,

    /// Pause after each typed character, in milliseconds.
    #[arg(long, value_name = "MS")]
    key_delay_ms: Option<u64>,

    /// Wait before the first poll, in milliseconds, to focus the target field.
    #[arg(long, value_name = "MS")]
    startup_delay_ms: Option<u64>,

    /// Print the names of the attached readers and exit.
    #[arg(long)]
    list_readers: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(backend) = self.backend {
            config.output.backend = backend;
        }
        if let Some(reader) = &self.reader {
            config.reader.name_filter = Some(reader.clone());
        }
        if let Some(ms) = self.poll_interval_ms {
            config.reader.poll_interval_ms = ms;
        }
        if let Some(ms) = self.key_delay_ms {
            config.output.inter_key_delay_ms = ms;
        }
        if let Some(ms) = self.startup_delay_ms {
            config.output.startup_delay_ms = ms;
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Builds the fmt subscriber used by the binary.
///
/// Log lines go to `writer`, which is stderr in `main`: stdout is reserved
/// for console-backend UIDs and `--list-readers` output.
fn log_subscriber<W>(filter: EnvFilter, writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("invalid command-line override")?;

    // `RUST_LOG` wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level));
    log_subscriber(filter, std::io::stderr).init();

    let manager = PcscReaderManager::new().context("cannot reach the PC/SC service")?;

    if cli.list_readers {
        let names = manager.list_readers().context("failed to enumerate readers")?;
        if names.is_empty() {
            warn!("no card reader attached");
        }
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let reader = manager
        .select(config.reader.name_filter.as_deref())
        .context("cannot start without a card reader")?;

    info!(
        reader = reader.name(),
        backend = ?config.output.backend,
        "nfc-wedge starting"
    );

    // ── Graceful shutdown flag ────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, stopping after the current poll");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => error!("failed to listen for Ctrl+C signal: {e}"),
        }
    });

    // ── Poll loop ─────────────────────────────────────────────────────────────
    //
    // The reader and the key injector are used from one dedicated thread; the
    // X11 display handle cannot leave the thread that opened it.
    let output = config.output.clone();
    let poll_interval = config.reader.poll_interval();
    let result = tokio::task::spawn_blocking(move || {
        let sink = build_sink(&output)?;
        let startup_delay = output.startup_delay();
        if !startup_delay.is_zero() {
            info!(
                delay_ms = output.startup_delay_ms,
                "waiting before the first poll; focus the target field"
            );
            thread::sleep(startup_delay);
        }
        let mut emit = EmitLoop::new(reader, sink, poll_interval);
        emit.run(&running)
    })
    .await
    .context("poll loop thread panicked")?;

    result.context("key injection failed")?;
    info!("nfc-wedge stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    use nfc_wedge::infrastructure::key_injection::console::ConsoleSink;
    use nfc_wedge::infrastructure::reader::mock::{ScriptStep, ScriptedReader};

    /// In-memory stand-in for stderr.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_cli_without_arguments_keeps_file_config() {
        // Arrange
        let cli = Cli::parse_from(["nfc-wedge"]);
        let mut config = AppConfig::default();

        // Act
        cli.apply(&mut config);

        // Assert
        assert_eq!(config, AppConfig::default());
        assert!(!cli.list_readers);
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let cli = Cli::parse_from([
            "nfc-wedge",
            "--backend",
            "console",
            "--reader",
            "RC-S300",
            "--poll-interval-ms",
            "250",
            "--key-delay-ms",
            "0",
            "--startup-delay-ms",
            "3000",
        ]);
        let mut config = AppConfig::default();

        cli.apply(&mut config);

        assert_eq!(config.output.backend, Backend::Console);
        assert_eq!(config.reader.name_filter.as_deref(), Some("RC-S300"));
        assert_eq!(config.reader.poll_interval_ms, 250);
        assert_eq!(config.output.inter_key_delay_ms, 0);
        assert_eq!(config.output.startup_delay_ms, 3000);
    }

    #[test]
    fn test_cli_rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["nfc-wedge", "--backend", "bluetooth"]).is_err());
    }

    #[test]
    fn test_cli_list_readers_flag() {
        let cli = Cli::parse_from(["nfc-wedge", "--list-readers"]);

        assert!(cli.list_readers);
    }

    #[test]
    fn test_zero_poll_interval_override_fails_validation() {
        let cli = Cli::parse_from(["nfc-wedge", "--poll-interval-ms", "0"]);
        let mut config = AppConfig::default();

        cli.apply(&mut config);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_lines_never_reach_the_console_sink_stream() {
        // Arrange
        let log = SharedBuf::default();
        let log_writer = log.clone();
        let subscriber = log_subscriber(EnvFilter::new("info"), move || log_writer.clone());
        let mut emit = EmitLoop::new(
            ScriptedReader::new([ScriptStep::card(&[0x04, 0xA1, 0xB2, 0xC3])]),
            ConsoleSink::new(Vec::new()),
            Duration::ZERO,
        );

        // Act
        tracing::subscriber::with_default(subscriber, || emit.poll_cycle().unwrap());

        // Assert
        let (_, sink) = emit.into_parts();
        let uids = String::from_utf8(sink.into_inner()).unwrap();
        let logged = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert_eq!(uids, "04A1B2C3\n");
        assert!(logged.contains("card read"), "log output: {logged}");
        assert!(logged.contains("04A1B2C3"));
    }
}
