use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// States of a reorder run.
///
/// `Uninitialized -> SessionOpen -> DocumentOpen -> Reordering -> Saved`, with
/// `Aborted` reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderStage {
    Uninitialized,
    SessionOpen,
    DocumentOpen,
    Reordering,
    Saved,
    Aborted,
}

impl ReorderStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::SessionOpen => "session_open",
            Self::DocumentOpen => "document_open",
            Self::Reordering => "reordering",
            Self::Saved => "saved",
            Self::Aborted => "aborted",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Saved | Self::Aborted)
    }
}

impl fmt::Display for ReorderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one copy/paste step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Placed,
    Skipped { reason: String },
}

/// One entry of the slide order and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Requested 1-based position in the new document.
    pub position: usize,
    /// 1-based index of the slide in the source document.
    pub source_index: usize,
    #[serde(flatten)]
    pub status: StepStatus,
}

impl StepOutcome {
    pub fn placed(position: usize, source_index: usize) -> Self {
        Self {
            position,
            source_index,
            status: StepStatus::Placed,
        }
    }

    pub fn skipped(position: usize, source_index: usize, reason: impl Into<String>) -> Self {
        Self {
            position,
            source_index,
            status: StepStatus::Skipped {
                reason: reason.into(),
            },
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self.status, StepStatus::Placed)
    }
}

/// Summary of a reorder run that reached the saved state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderReport {
    pub source: PathBuf,
    /// Absolute path of the saved document.
    pub output: PathBuf,
    /// Slide count of the source document.
    pub slide_count: usize,
    pub steps: Vec<StepOutcome>,
}

impl ReorderReport {
    pub fn placed_count(&self) -> usize {
        self.steps.iter().filter(|step| step.is_placed()).count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|step| !step.is_placed())
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }

    /// True when every slide made it into the output.
    pub fn is_complete(&self) -> bool {
        self.skipped_count() == 0
    }
}
