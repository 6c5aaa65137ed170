//! Slide shuffler CLI.

use clap::Parser;

use deck_cli::cli::{Cli, Command};
use deck_cli::exit::{EXIT_FAILURE, EXIT_SUCCESS, exit_code, reorder_exit_code};
use deck_cli::logging::{LogConfig, init_logging};

mod commands;

use crate::commands::{run_apply, run_order, run_shuffle};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&LogConfig::from(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_FAILURE);
    }
    let outcome = match &cli.command {
        Command::Order(args) => run_order(args).map(|_| EXIT_SUCCESS),
        Command::Apply(args) => run_apply(args).map(|report| reorder_exit_code(&report)),
        Command::Shuffle(args) => run_shuffle(args).map(|report| reorder_exit_code(&report)),
    };
    std::process::exit(exit_code(outcome));
}
