//! File-backed automation host over JSON deck manifests.
//!
//! A manifest is the stand-in document format used by the command line:
//!
//! ```json
//! { "title": "Team update", "slides": [{ "id": "ada", "title": "Ada" }] }
//! ```
//!
//! Documents live in memory while open and are written back only by
//! [`AutomationHost::save_as`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use deck_model::{HostError, HostOperation};

use crate::host::{AutomationHost, DocumentId, HostConnector, HostResult, TransferBuffer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl Slide {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckManifest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl DeckManifest {
    pub fn load(path: &Path) -> HostResult<Self> {
        let content = fs::read_to_string(path).map_err(|error| {
            HostError::new(
                HostOperation::OpenDocument,
                format!("{}: {error}", path.display()),
            )
        })?;
        serde_json::from_str(&content).map_err(|error| {
            HostError::new(
                HostOperation::OpenDocument,
                format!("{} is not a deck manifest: {error}", path.display()),
            )
        })
    }

    /// Writes pretty JSON next to `path` and renames it into place.
    pub fn save(&self, path: &Path) -> HostResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|error| save_error(path, error))?;
        let tmp = temp_path(path);
        fs::write(&tmp, json).map_err(|error| save_error(path, error))?;
        if let Err(error) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(save_error(path, error));
        }
        Ok(())
    }

    pub fn slide_ids(&self) -> Vec<&str> {
        self.slides.iter().map(|slide| slide.id.as_str()).collect()
    }
}

fn save_error(path: &Path, error: impl std::fmt::Display) -> HostError {
    HostError::new(
        HostOperation::SaveAs,
        format!("{}: {error}", path.display()),
    )
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Holds at most one copied slide.
#[derive(Debug, Clone, Default)]
pub struct SlideClipboard {
    slot: Option<Slide>,
}

impl TransferBuffer for SlideClipboard {
    fn clear(&mut self) -> HostResult<()> {
        self.slot = None;
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

/// In-process host editing [`DeckManifest`] documents.
#[derive(Debug, Default)]
pub struct ManifestHost {
    documents: BTreeMap<DocumentId, DeckManifest>,
    next_id: u64,
    quit: bool,
}

impl ManifestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self, doc: DocumentId) -> Option<&DeckManifest> {
        self.documents.get(&doc)
    }

    fn ensure_running(&self, operation: HostOperation) -> HostResult<()> {
        if self.quit {
            Err(HostError::new(operation, "host has quit"))
        } else {
            Ok(())
        }
    }

    fn insert(&mut self, manifest: DeckManifest) -> DocumentId {
        self.next_id += 1;
        let doc = DocumentId(self.next_id);
        self.documents.insert(doc, manifest);
        doc
    }

    fn get(&self, doc: DocumentId, operation: HostOperation) -> HostResult<&DeckManifest> {
        self.ensure_running(operation)?;
        self.documents
            .get(&doc)
            .ok_or_else(|| HostError::new(operation, format!("{doc} is not open")))
    }

    fn get_mut(
        &mut self,
        doc: DocumentId,
        operation: HostOperation,
    ) -> HostResult<&mut DeckManifest> {
        self.ensure_running(operation)?;
        self.documents
            .get_mut(&doc)
            .ok_or_else(|| HostError::new(operation, format!("{doc} is not open")))
    }
}

impl AutomationHost for ManifestHost {
    type Buffer = SlideClipboard;

    fn transfer_buffer(&self) -> Self::Buffer {
        SlideClipboard::default()
    }

    fn open_document(&mut self, path: &Path) -> HostResult<DocumentId> {
        self.ensure_running(HostOperation::OpenDocument)?;
        let manifest = DeckManifest::load(path)?;
        let doc = self.insert(manifest);
        debug!(document = %doc, path = %path.display(), "opened manifest");
        Ok(doc)
    }

    fn create_document(&mut self) -> HostResult<DocumentId> {
        self.ensure_running(HostOperation::CreateDocument)?;
        Ok(self.insert(DeckManifest::default()))
    }

    fn slide_count(&self, doc: DocumentId) -> HostResult<usize> {
        Ok(self.get(doc, HostOperation::SlideCount)?.slides.len())
    }

    fn copy_slide(
        &mut self,
        doc: DocumentId,
        index: usize,
        buffer: &mut Self::Buffer,
    ) -> HostResult<()> {
        let manifest = self.get(doc, HostOperation::CopySlide)?;
        let slide = index
            .checked_sub(1)
            .and_then(|idx| manifest.slides.get(idx))
            .ok_or_else(|| {
                HostError::new(
                    HostOperation::CopySlide,
                    format!("slide {index} out of range 1..={}", manifest.slides.len()),
                )
            })?;
        buffer.slot = Some(slide.clone());
        Ok(())
    }

    fn paste_slide(&mut self, doc: DocumentId, buffer: &mut Self::Buffer) -> HostResult<()> {
        let slide = buffer
            .slot
            .clone()
            .ok_or_else(|| HostError::new(HostOperation::PasteSlide, "transfer buffer is empty"))?;
        self.get_mut(doc, HostOperation::PasteSlide)?.slides.push(slide);
        Ok(())
    }

    fn save_as(&mut self, doc: DocumentId, path: &Path) -> HostResult<()> {
        self.get(doc, HostOperation::SaveAs)?.save(path)?;
        debug!(document = %doc, path = %path.display(), "saved manifest");
        Ok(())
    }

    fn close_document(&mut self, doc: DocumentId) -> HostResult<()> {
        self.ensure_running(HostOperation::CloseDocument)?;
        self.documents
            .remove(&doc)
            .map(|_| ())
            .ok_or_else(|| {
                HostError::new(HostOperation::CloseDocument, format!("{doc} is not open"))
            })
    }

    fn quit(&mut self) -> HostResult<()> {
        self.ensure_running(HostOperation::Quit)?;
        self.documents.clear();
        self.quit = true;
        Ok(())
    }
}

/// Connector handing out fresh [`ManifestHost`] sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestConnector;

impl HostConnector for ManifestConnector {
    type Host = ManifestHost;

    fn connect(&self) -> HostResult<Self::Host> {
        Ok(ManifestHost::new())
    }
}
