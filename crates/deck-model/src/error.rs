//! Error types for order derivation and reorder application.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::report::ReorderStage;

/// How many differing identifiers a set mismatch message lists per side.
const MISMATCH_SAMPLE: usize = 5;

/// Problems with the shape of the identifier lists or of a slide order.
///
/// These are recoverable by re-supplying corrected input and are always
/// raised before any automation resource is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identifier file does not exist.
    #[error("identifier file not found: {path}")]
    MissingFile { path: PathBuf },

    /// Identifier column is absent from the file header.
    #[error("column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Identifier file exists but could not be parsed.
    #[error("failed to read identifiers from {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    /// One or both identifier lists are empty.
    #[error("one or both identifier lists are empty ({first} and {second} entries)")]
    EmptyList { first: usize, second: usize },

    /// Identifier lists have different lengths.
    #[error("identifier counts differ ({first} in the first list, {second} in the second)")]
    LengthMismatch { first: usize, second: usize },

    /// Identifier lists have the same length but different entries.
    #[error(
        "identifier lists do not contain the same entries{}",
        describe_difference(.missing_from_first, .missing_from_second)
    )]
    SetMismatch {
        /// Entries of the second list with no partner in the first.
        missing_from_first: Vec<String>,
        /// Entries of the first list with no partner in the second.
        missing_from_second: Vec<String>,
    },

    /// Slide order has no entries.
    #[error("slide order is empty")]
    OrderEmpty,

    /// Slide order length differs from the slide count.
    #[error("slide order length ({order_len}) does not match slide count ({slide_count})")]
    CountMismatch { order_len: usize, slide_count: usize },

    /// Slide order is not a permutation of 1..=slide_count.
    #[error(
        "slide order {order} is invalid: it must contain each index from 1 to {slide_count} exactly once"
    )]
    OrderInvalid { order: String, slide_count: usize },
}

fn describe_difference(missing_from_first: &[String], missing_from_second: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing_from_first.is_empty() {
        parts.push(format!(
            "only in second list: {}",
            sample(missing_from_first)
        ));
    }
    if !missing_from_second.is_empty() {
        parts.push(format!(
            "only in first list: {}",
            sample(missing_from_second)
        ));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join("; "))
    }
}

fn sample(values: &[String]) -> String {
    let mut shown: Vec<String> = values
        .iter()
        .take(MISMATCH_SAMPLE)
        .map(|value| format!("'{value}'"))
        .collect();
    if values.len() > MISMATCH_SAMPLE {
        shown.push(format!("and {} more", values.len() - MISMATCH_SAMPLE));
    }
    shown.join(", ")
}

/// Automation host operation that produced a [`HostError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOperation {
    Connect,
    OpenDocument,
    CreateDocument,
    SlideCount,
    ClearBuffer,
    CopySlide,
    PasteSlide,
    SaveAs,
    CloseDocument,
    Quit,
}

impl HostOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::OpenDocument => "open document",
            Self::CreateDocument => "create document",
            Self::SlideCount => "slide count",
            Self::ClearBuffer => "clear transfer buffer",
            Self::CopySlide => "copy slide",
            Self::PasteSlide => "paste slide",
            Self::SaveAs => "save as",
            Self::CloseDocument => "close document",
            Self::Quit => "quit",
        }
    }
}

impl fmt::Display for HostOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by an automation host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {message}")]
pub struct HostError {
    pub operation: HostOperation,
    pub message: String,
}

impl HostError {
    pub fn new(operation: HostOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Document, session and structural failures raised while applying an order.
#[derive(Debug, Error)]
pub enum ApplicationError {
    // === Resource Acquisition ===
    /// Automation session could not be started.
    #[error("failed to initialize automation session: {source}")]
    SessionInit {
        #[source]
        source: HostError,
    },

    /// Source document is missing or corrupt.
    #[error("failed to open presentation {path}: {source}")]
    DocumentOpen {
        path: PathBuf,
        #[source]
        source: HostError,
    },

    // === Structural Validation ===
    /// Source document has no slides.
    #[error("no slides found in {path}")]
    EmptyDocument { path: PathBuf },

    /// Slide order is empty.
    #[error("slide order list is empty")]
    EmptyOrder,

    /// Slide order length differs from the slide count.
    #[error("slide order length ({order_len}) does not match slide count ({slide_count})")]
    CountMismatch { order_len: usize, slide_count: usize },

    /// Slide order is not a permutation of 1..=slide_count.
    #[error(
        "slide order {order} is invalid: it must contain unique indices from 1 to {slide_count}"
    )]
    InvalidOrder { order: String, slide_count: usize },

    // === Reordering and Save ===
    /// Target document could not be created.
    #[error("failed to create target presentation: {source}")]
    TargetCreate {
        #[source]
        source: HostError,
    },

    /// Target document could not be saved.
    #[error("failed to save presentation to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: HostError,
    },

    /// Session or document handles could not be released.
    #[error("failed to close automation session: {source}")]
    Teardown {
        #[source]
        source: HostError,
    },
}

impl ApplicationError {
    /// Stage the run had reached when the error was raised.
    pub fn stage(&self) -> ReorderStage {
        match self {
            Self::SessionInit { .. } => ReorderStage::Uninitialized,
            Self::DocumentOpen { .. } => ReorderStage::SessionOpen,
            Self::EmptyDocument { .. }
            | Self::EmptyOrder
            | Self::CountMismatch { .. }
            | Self::InvalidOrder { .. }
            | Self::TargetCreate { .. } => ReorderStage::DocumentOpen,
            Self::Save { .. } | Self::Teardown { .. } => ReorderStage::Reordering,
        }
    }
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
