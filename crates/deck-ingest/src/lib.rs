//! Identifier list ingestion for slide order derivation.

pub mod column;

pub use column::{load_identifier_lists, read_identifier_column};
