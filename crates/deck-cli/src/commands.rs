use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use deck_cli::paths::default_output_path;
use deck_cli::summary::{print_order, print_report};
use deck_core::{ManifestConnector, ShuffleOutcome, ShuffleRequest, apply, derive, shuffle};
use deck_ingest::load_identifier_lists;
use deck_model::{Permutation, ReorderOptions, ReorderReport};

use deck_cli::cli::{ApplyArgs, DeckArgs, OrderArgs, OrderFormatArg, ShuffleArgs};

#[derive(Serialize)]
struct OrderJson<'a> {
    column: &'a str,
    order: &'a Permutation,
}

#[derive(Serialize)]
struct ShuffleJson<'a> {
    order: &'a Permutation,
    report: &'a ReorderReport,
}

pub fn run_order(args: &OrderArgs) -> Result<Permutation> {
    let lists = &args.lists;
    let (current, target) =
        load_identifier_lists(&lists.current_list, &lists.target_list, &lists.column)
            .context("load identifier lists")?;
    let order = derive(&current, &target).context("derive slide order")?;
    match args.format {
        OrderFormatArg::Table => print_order(&current, &order),
        OrderFormatArg::Json => {
            let json = serde_json::to_string_pretty(&OrderJson {
                column: &lists.column,
                order: &order,
            })?;
            println!("{json}");
        }
    }
    Ok(order)
}

pub fn run_apply(args: &ApplyArgs) -> Result<ReorderReport> {
    let output = output_path(&args.deck, &args.deck_args);
    info!(deck = %args.deck.display(), order = %args.order, "applying slide order");
    let report = apply(
        &ManifestConnector,
        &args.deck,
        &output,
        &args.order,
        &reorder_options(&args.deck_args),
    )
    .with_context(|| format!("reorder {}", args.deck.display()))?;
    if args.deck_args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(report)
}

pub fn run_shuffle(args: &ShuffleArgs) -> Result<ReorderReport> {
    let request = ShuffleRequest::new(
        &args.lists.current_list,
        &args.lists.target_list,
        &args.deck,
        output_path(&args.deck, &args.deck_args),
    )
    .with_column(&args.lists.column)
    .with_options(reorder_options(&args.deck_args));
    let ShuffleOutcome { order, report } = shuffle(&ManifestConnector, &request)
        .with_context(|| format!("shuffle {}", args.deck.display()))?;
    if args.deck_args.json {
        let json = serde_json::to_string_pretty(&ShuffleJson {
            order: &order,
            report: &report,
        })?;
        println!("{json}");
    } else {
        println!("Slide order: {order}");
        print_report(&report);
    }
    Ok(report)
}

fn output_path(deck: &std::path::Path, args: &DeckArgs) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| default_output_path(deck))
}

fn reorder_options(args: &DeckArgs) -> ReorderOptions {
    ReorderOptions::new().with_settle_delay(Duration::from_millis(args.settle_ms))
}
