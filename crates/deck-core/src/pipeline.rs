//! Ingest, derive and apply in one call.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info_span;

use deck_ingest::load_identifier_lists;
use deck_model::{
    ApplicationError, DEFAULT_IDENTIFIER_COLUMN, Permutation, ReorderOptions, ReorderReport,
    ValidationError,
};

use crate::host::HostConnector;
use crate::order::derive;
use crate::reorder::apply;

/// Everything needed to shuffle one deck.
#[derive(Debug, Clone)]
pub struct ShuffleRequest {
    /// Identifier file describing the current slide order.
    pub current_list: PathBuf,
    /// Identifier file describing the wanted slide order.
    pub target_list: PathBuf,
    /// Column holding the identifiers in both files.
    pub column: String,
    pub deck: PathBuf,
    pub output: PathBuf,
    pub options: ReorderOptions,
}

impl ShuffleRequest {
    pub fn new(
        current_list: impl Into<PathBuf>,
        target_list: impl Into<PathBuf>,
        deck: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            current_list: current_list.into(),
            target_list: target_list.into(),
            column: DEFAULT_IDENTIFIER_COLUMN.to_string(),
            deck: deck.into(),
            output: output.into(),
            options: ReorderOptions::default(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ReorderOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Error)]
pub enum ShuffleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

#[derive(Debug, Clone)]
pub struct ShuffleOutcome {
    pub order: Permutation,
    pub report: ReorderReport,
}

/// Reads both identifier lists, derives the order and applies it to the deck.
///
/// List problems are reported before `connector` is used.
pub fn shuffle<C: HostConnector>(
    connector: &C,
    request: &ShuffleRequest,
) -> Result<ShuffleOutcome, ShuffleError> {
    let span = info_span!("shuffle", deck = %request.deck.display(), column = %request.column);
    let _guard = span.enter();
    let (current, target) =
        load_identifier_lists(&request.current_list, &request.target_list, &request.column)?;
    let order = derive(&current, &target)?;
    let report = apply(
        connector,
        &request.deck,
        &request.output,
        &order,
        &request.options,
    )?;
    Ok(ShuffleOutcome { order, report })
}
