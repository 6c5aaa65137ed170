//! Capability interface over a presentation automation host.
//!
//! The reorder state machine only talks to these traits, so it runs the same
//! against a vendor automation driver, the JSON manifest host or a test fake.

use std::fmt;
use std::path::Path;

use deck_model::HostError;

pub type HostResult<T> = Result<T, HostError>;

/// Handle to a document opened or created by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

/// Clipboard-like buffer a slide passes through between copy and paste.
pub trait TransferBuffer {
    /// Drops whatever the buffer holds.
    fn clear(&mut self) -> HostResult<()>;

    fn is_empty(&self) -> bool;
}

/// Document operations offered by an automation session.
///
/// Slide indices are 1-based.
pub trait AutomationHost {
    type Buffer: TransferBuffer;

    /// Buffer shared by this session's copy and paste calls.
    fn transfer_buffer(&self) -> Self::Buffer;

    fn open_document(&mut self, path: &Path) -> HostResult<DocumentId>;

    /// Creates a new document with no slides.
    fn create_document(&mut self) -> HostResult<DocumentId>;

    fn slide_count(&self, doc: DocumentId) -> HostResult<usize>;

    /// Copies slide `index` of `doc` into `buffer`.
    fn copy_slide(
        &mut self,
        doc: DocumentId,
        index: usize,
        buffer: &mut Self::Buffer,
    ) -> HostResult<()>;

    /// Appends the buffered slide to the end of `doc`.
    fn paste_slide(&mut self, doc: DocumentId, buffer: &mut Self::Buffer) -> HostResult<()>;

    fn save_as(&mut self, doc: DocumentId, path: &Path) -> HostResult<()>;

    fn close_document(&mut self, doc: DocumentId) -> HostResult<()>;

    /// Ends the session. No other call is valid afterwards.
    fn quit(&mut self) -> HostResult<()>;
}

/// Starts automation sessions.
pub trait HostConnector {
    type Host: AutomationHost;

    fn connect(&self) -> HostResult<Self::Host>;
}
