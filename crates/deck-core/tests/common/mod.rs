//! Scripted automation host for exercising the reorder state machine.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use deck_core::{AutomationHost, DocumentId, HostConnector, HostResult, TransferBuffer};
use deck_model::{HostError, HostOperation, ReorderOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Connect,
    Open(PathBuf),
    Create,
    Clear,
    Copy(usize),
    Paste,
    Save(PathBuf),
    Close(DocumentId),
    Quit,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub disk: BTreeMap<PathBuf, Vec<String>>,
    pub events: Vec<Event>,
}

/// Connector whose hosts share one fake disk and event log.
#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    pub state: Rc<RefCell<FakeState>>,
    pub fail_connect: bool,
    pub fail_clear: bool,
    pub fail_save: bool,
    pub fail_close: bool,
    /// Source indices whose copy fails.
    pub fail_copy: BTreeSet<usize>,
    /// 1-based paste calls that fail.
    pub fail_paste: BTreeSet<usize>,
}

impl FakeConnector {
    pub fn with_deck(path: &str, slides: &[&str]) -> Self {
        let connector = Self::default();
        connector.put_deck(path, slides);
        connector
    }

    pub fn put_deck(&self, path: &str, slides: &[&str]) {
        self.state.borrow_mut().disk.insert(
            PathBuf::from(path),
            slides.iter().map(|slide| (*slide).to_string()).collect(),
        );
    }

    pub fn deck(&self, path: &str) -> Option<Vec<String>> {
        self.state.borrow().disk.get(Path::new(path)).cloned()
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn count(&self, wanted: &Event) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|event| *event == wanted)
            .count()
    }

    pub fn closes(&self) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|event| matches!(event, Event::Close(_)))
            .count()
    }

    fn record(&self, event: Event) {
        self.state.borrow_mut().events.push(event);
    }
}

impl HostConnector for FakeConnector {
    type Host = FakeHost;

    fn connect(&self) -> HostResult<FakeHost> {
        self.record(Event::Connect);
        if self.fail_connect {
            return Err(HostError::new(HostOperation::Connect, "host not installed"));
        }
        Ok(FakeHost {
            config: self.clone(),
            documents: BTreeMap::new(),
            next_id: 0,
            pastes: 0,
        })
    }
}

pub struct FakeHost {
    config: FakeConnector,
    documents: BTreeMap<DocumentId, Vec<String>>,
    next_id: u64,
    pastes: usize,
}

pub struct FakeBuffer {
    slot: Option<String>,
    config: FakeConnector,
}

impl TransferBuffer for FakeBuffer {
    fn clear(&mut self) -> HostResult<()> {
        self.config.record(Event::Clear);
        if self.config.fail_clear {
            return Err(HostError::new(HostOperation::ClearBuffer, "clipboard locked"));
        }
        self.slot = None;
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

impl FakeHost {
    fn insert(&mut self, slides: Vec<String>) -> DocumentId {
        self.next_id += 1;
        let doc = DocumentId(self.next_id);
        self.documents.insert(doc, slides);
        doc
    }

    fn doc(&self, doc: DocumentId, operation: HostOperation) -> HostResult<&Vec<String>> {
        self.documents
            .get(&doc)
            .ok_or_else(|| HostError::new(operation, "no such document"))
    }
}

impl AutomationHost for FakeHost {
    type Buffer = FakeBuffer;

    fn transfer_buffer(&self) -> FakeBuffer {
        FakeBuffer {
            slot: None,
            config: self.config.clone(),
        }
    }

    fn open_document(&mut self, path: &Path) -> HostResult<DocumentId> {
        self.config.record(Event::Open(path.to_path_buf()));
        let slides = self
            .config
            .state
            .borrow()
            .disk
            .get(path)
            .cloned()
            .ok_or_else(|| HostError::new(HostOperation::OpenDocument, "file not found"))?;
        Ok(self.insert(slides))
    }

    fn create_document(&mut self) -> HostResult<DocumentId> {
        self.config.record(Event::Create);
        Ok(self.insert(Vec::new()))
    }

    fn slide_count(&self, doc: DocumentId) -> HostResult<usize> {
        Ok(self.doc(doc, HostOperation::SlideCount)?.len())
    }

    fn copy_slide(
        &mut self,
        doc: DocumentId,
        index: usize,
        buffer: &mut FakeBuffer,
    ) -> HostResult<()> {
        self.config.record(Event::Copy(index));
        if self.config.fail_copy.contains(&index) {
            return Err(HostError::new(HostOperation::CopySlide, "host busy"));
        }
        let slide = self.doc(doc, HostOperation::CopySlide)?[index - 1].clone();
        buffer.slot = Some(slide);
        Ok(())
    }

    fn paste_slide(&mut self, doc: DocumentId, buffer: &mut FakeBuffer) -> HostResult<()> {
        self.config.record(Event::Paste);
        self.pastes += 1;
        if self.config.fail_paste.contains(&self.pastes) {
            return Err(HostError::new(HostOperation::PasteSlide, "paste rejected"));
        }
        let slide = buffer
            .slot
            .clone()
            .ok_or_else(|| HostError::new(HostOperation::PasteSlide, "buffer empty"))?;
        self.documents
            .get_mut(&doc)
            .ok_or_else(|| HostError::new(HostOperation::PasteSlide, "no such document"))?
            .push(slide);
        Ok(())
    }

    fn save_as(&mut self, doc: DocumentId, path: &Path) -> HostResult<()> {
        self.config.record(Event::Save(path.to_path_buf()));
        if self.config.fail_save {
            return Err(HostError::new(HostOperation::SaveAs, "disk full"));
        }
        let slides = self.doc(doc, HostOperation::SaveAs)?.clone();
        self.config
            .state
            .borrow_mut()
            .disk
            .insert(path.to_path_buf(), slides);
        Ok(())
    }

    fn close_document(&mut self, doc: DocumentId) -> HostResult<()> {
        self.config.record(Event::Close(doc));
        self.documents.remove(&doc);
        if self.config.fail_close {
            return Err(HostError::new(HostOperation::CloseDocument, "document locked"));
        }
        Ok(())
    }

    fn quit(&mut self) -> HostResult<()> {
        self.config.record(Event::Quit);
        Ok(())
    }
}

/// Smallest settling delay so tests stay fast.
pub fn fast() -> ReorderOptions {
    ReorderOptions::new().with_settle_delay(Duration::ZERO)
}

pub fn slides(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("slide-{n}")).collect()
}
