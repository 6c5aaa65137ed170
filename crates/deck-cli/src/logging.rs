//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! All crates log through `tracing`; this module installs the subscriber for
//! the command line.
//!
//! # Log Levels
//!
//! - `error`: aborted runs, slides skipped during a reorder
//! - `warn`: rejected identifier lists, cleanup failures
//! - `info`: stage progress, derived order, one line per copied slide
//! - `debug`: stage transitions, host calls
//! - `trace`: unused
//!
//! # Usage
//!
//! ```ignore
//! use clap::Parser;
//! use deck_cli::cli::Cli;
//! use deck_cli::logging::{init_logging, LogConfig};
//!
//! let cli = Cli::parse();
//! init_logging(&LogConfig::from(&cli))?;
//! ```

use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::ColorChoice;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::cli::{Cli, LogFormatArg};

/// Crates whose events follow the configured level; others stay at `warn`.
const WORKSPACE_TARGETS: &[&str] = &["deck_cli", "deck_core", "deck_ingest", "deck_model"];

/// Subscriber settings resolved from the global command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level for workspace crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter`.
    pub use_env_filter: bool,
    pub timestamps: bool,
    pub ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable output.
    Pretty,
    /// Single-line output.
    Compact,
    /// One JSON object per event, with span close events.
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

impl From<&Cli> for LogConfig {
    /// `--log-level` wins over `-v`/`-q`; either one disables `RUST_LOG`.
    fn from(cli: &Cli) -> Self {
        let explicit = cli.log_level.map(LevelFilter::from);
        Self {
            level_filter: explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !cli.verbosity.is_present(),
            timestamps: cli.log_timestamps,
            ansi: ansi_enabled(cli.color.color, cli.log_file.is_some()),
            format: cli.log_format.into(),
            log_file: cli.log_file.clone(),
        }
    }
}

fn ansi_enabled(choice: ColorChoice, to_file: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => !to_file && io::stderr().is_terminal(),
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            format_layer(config, SharedFileWriter::new(file))
        }
        None => format_layer(config, io::stderr),
    };
    tracing_subscriber::registry()
        .with(layer.with_filter(build_env_filter(config)))
        .init();
    Ok(())
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

fn format_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let base = fmt::layer().with_writer(writer).with_target(false);
    match (config.format, config.timestamps) {
        (LogFormat::Json, true) => base.json().with_span_events(FmtSpan::CLOSE).boxed(),
        (LogFormat::Json, false) => base
            .json()
            .without_time()
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        (LogFormat::Compact, true) => base.compact().with_ansi(config.ansi).boxed(),
        (LogFormat::Compact, false) => base
            .compact()
            .without_time()
            .with_ansi(config.ansi)
            .boxed(),
        (LogFormat::Pretty, true) => base.with_ansi(config.ansi).boxed(),
        (LogFormat::Pretty, false) => base.without_time().with_ansi(config.ansi).boxed(),
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

/// Directive string applying `level` to every workspace crate.
pub fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}")),
    );
    directives.join(",")
}

/// Build an `EnvFilter`, letting `RUST_LOG` win when allowed.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(config.level_filter));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn directives_cover_workspace_crates() {
        assert_eq!(
            default_directives(LevelFilter::DEBUG),
            "warn,deck_cli=debug,deck_core=debug,deck_ingest=debug,deck_model=debug"
        );
    }

    #[test]
    fn off_level_is_lowercase() {
        assert!(default_directives(LevelFilter::OFF).ends_with("deck_model=off"));
    }

    fn config(args: &[&str]) -> LogConfig {
        let argv = std::iter::once("deck-shuffle")
            .chain(args.iter().copied())
            .chain(["apply", "deck.json", "--order", "1"]);
        LogConfig::from(&Cli::parse_from(argv))
    }

    #[test]
    fn defaults_defer_to_rust_log() {
        let config = config(&["--color", "never"]);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert!(!config.timestamps);
        assert!(!config.ansi);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn verbosity_flag_disables_rust_log() {
        let config = config(&["-vv"]);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn explicit_level_wins_over_verbosity() {
        let config = config(&["-v", "--log-level", "trace"]);
        assert_eq!(config.level_filter, LevelFilter::TRACE);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn file_output_flags() {
        let config = config(&[
            "--log-file",
            "run.log",
            "--log-format",
            "json",
            "--log-timestamps",
        ]);
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.timestamps);
        assert!(!config.ansi);
    }

    #[test]
    fn forced_color_applies_to_files() {
        assert!(config(&["--color", "always", "--log-file", "run.log"]).ansi);
    }
}
