//! Scoped automation session.

use std::path::Path;

use tracing::{debug, warn};

use deck_model::HostError;

use crate::host::{AutomationHost, DocumentId, HostConnector, HostResult};

/// Owns a connected host and every document opened through it.
///
/// Teardown closes the tracked documents one by one and then quits the host.
/// It runs exactly once: either through [`Session::close`], which reports the
/// first failure, or on drop, which logs and swallows failures.
pub struct Session<H: AutomationHost> {
    host: H,
    open_documents: Vec<DocumentId>,
    torn_down: bool,
}

impl<H: AutomationHost> Session<H> {
    pub fn open<C>(connector: &C) -> HostResult<Self>
    where
        C: HostConnector<Host = H>,
    {
        let host = connector.connect()?;
        debug!("automation session started");
        Ok(Self::new(host))
    }

    /// Wraps an already connected host.
    pub fn new(host: H) -> Self {
        Self {
            host,
            open_documents: Vec::new(),
            torn_down: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn open_document(&mut self, path: &Path) -> HostResult<DocumentId> {
        let doc = self.host.open_document(path)?;
        self.open_documents.push(doc);
        Ok(doc)
    }

    pub fn create_document(&mut self) -> HostResult<DocumentId> {
        let doc = self.host.create_document()?;
        self.open_documents.push(doc);
        Ok(doc)
    }

    /// Closes remaining documents and quits the host.
    pub fn close(mut self) -> HostResult<()> {
        self.teardown()
    }

    fn teardown(&mut self) -> HostResult<()> {
        if self.torn_down {
            return Ok(());
        }
        self.torn_down = true;
        let mut first_error: Option<HostError> = None;
        for doc in std::mem::take(&mut self.open_documents) {
            if let Err(error) = self.host.close_document(doc) {
                warn!(document = %doc, %error, "failed to close document");
                first_error.get_or_insert(error);
            }
        }
        if let Err(error) = self.host.quit() {
            warn!(%error, "failed to quit automation host");
            first_error.get_or_insert(error);
        }
        debug!("automation session closed");
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl<H: AutomationHost> Drop for Session<H> {
    fn drop(&mut self) {
        if !self.torn_down {
            // Failures were already logged by teardown.
            let _ = self.teardown();
        }
    }
}
