//! CLI argument definitions for the slide shuffler.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use deck_model::{DEFAULT_IDENTIFIER_COLUMN, Permutation};

#[derive(Parser)]
#[command(
    name = "deck-shuffle",
    version,
    about = "Reorder presentation slides to match a reference list",
    long_about = "Reorder presentation slides to match a reference list.\n\n\
                  Two identifier files describe the current and the wanted slide order;\n\
                  the derived permutation is applied slide by slide to a deck manifest."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive the slide order from two identifier files and print it.
    Order(OrderArgs),

    /// Apply an explicit slide order to a deck.
    Apply(ApplyArgs),

    /// Derive the slide order and apply it to a deck.
    Shuffle(ShuffleArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// CSV file listing identifiers in the deck's current slide order.
    #[arg(value_name = "CURRENT_LIST")]
    pub current_list: PathBuf,

    /// CSV file listing the same identifiers in the wanted order.
    #[arg(value_name = "TARGET_LIST")]
    pub target_list: PathBuf,

    /// Column holding the identifiers in both files.
    #[arg(long = "column", default_value = DEFAULT_IDENTIFIER_COLUMN)]
    pub column: String,
}

#[derive(Args)]
pub struct DeckArgs {
    /// Output path (default: <DECK stem>_shuffled.<ext> next to the deck).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Wait between copy and paste, in milliseconds (minimum 1).
    #[arg(long = "settle-ms", value_name = "MS", default_value_t = 500)]
    pub settle_ms: u64,

    /// Print the reorder report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct OrderArgs {
    #[command(flatten)]
    pub lists: ListArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OrderFormatArg,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Deck manifest to reorder.
    #[arg(value_name = "DECK")]
    pub deck: PathBuf,

    /// Slide order, e.g. `3,1,2`.
    #[arg(long = "order", value_name = "INDICES")]
    pub order: Permutation,

    #[command(flatten)]
    pub deck_args: DeckArgs,
}

#[derive(Parser)]
pub struct ShuffleArgs {
    #[command(flatten)]
    pub lists: ListArgs,

    /// Deck manifest to reorder.
    #[arg(value_name = "DECK")]
    pub deck: PathBuf,

    #[command(flatten)]
    pub deck_args: DeckArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OrderFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
