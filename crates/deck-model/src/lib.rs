//! Data model for deriving and applying slide deck reorders.

pub mod error;
pub mod identifiers;
pub mod options;
pub mod permutation;
pub mod report;

pub use error::{ApplicationError, HostError, HostOperation, Result, ValidationError};
pub use identifiers::IdentifierList;
pub use options::{
    DEFAULT_IDENTIFIER_COLUMN, DEFAULT_SETTLE_DELAY, MIN_SETTLE_DELAY, ReorderOptions,
};
pub use permutation::{ParsePermutationError, Permutation};
pub use report::{ReorderReport, ReorderStage, StepOutcome, StepStatus};
