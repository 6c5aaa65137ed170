//! Slide order derivation and validated reorder application.
//!
//! The crate has two halves joined only by a [`Permutation`]:
//!
//! - [`order::derive`] turns two identifier lists into a slide order. It is
//!   pure and runs before anything touches a presentation.
//! - [`reorder::apply`] drives an [`AutomationHost`] through the
//!   `Uninitialized -> SessionOpen -> DocumentOpen -> Reordering -> Saved`
//!   state machine, copying one slide at a time into a new document.
//!
//! [`pipeline::shuffle`] chains ingest, derivation and application.
//!
//! [`Permutation`]: deck_model::Permutation

pub mod host;
pub mod manifest;
pub mod order;
pub mod pipeline;
pub mod reorder;
pub mod session;

pub use host::{AutomationHost, DocumentId, HostConnector, HostResult, TransferBuffer};
pub use manifest::{DeckManifest, ManifestConnector, ManifestHost, Slide, SlideClipboard};
pub use order::derive;
pub use pipeline::{ShuffleError, ShuffleOutcome, ShuffleRequest, shuffle};
pub use reorder::apply;
pub use session::Session;
