//! The document source the access service reads from.

use metamodel_decl::DeclarationDocument;
use metamodel_types::{DocumentId, DocumentStamp};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};

/// One document revision known to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentEntry {
    pub id: DocumentId,
    pub stamp: DocumentStamp,
}

impl DocumentEntry {
    #[must_use]
    pub fn new(id: DocumentId, stamp: DocumentStamp) -> Self {
        Self { id, stamp }
    }
}

/// Supplies declaration documents and their modification stamps.
///
/// Implementations are typically backed by a file index that may be
/// temporarily unsettled (still scanning) or inconsistent (being repaired).
/// Calls may block; the access service only invokes `load_document` from
/// the blocking pool.
pub trait DocumentProvider: Send + Sync {
    /// False while the underlying index is still being built.
    fn is_settled(&self) -> bool;

    /// Every known document with its current stamp.
    fn list_documents(&self) -> ProviderResult<Vec<DocumentEntry>>;

    fn load_document(&self, id: &DocumentId) -> ProviderResult<Arc<DeclarationDocument>>;

    /// Asks the provider to repair an inconsistent index. Fire and forget.
    fn request_reindex(&self);

    /// Counter that changes whenever the listing or index status may have
    /// changed. `None` when the provider does not track one, in which case
    /// every read lists the documents.
    fn generation(&self) -> Option<u64> {
        None
    }
}

impl<P: DocumentProvider + ?Sized> DocumentProvider for Arc<P> {
    fn is_settled(&self) -> bool {
        (**self).is_settled()
    }

    fn list_documents(&self) -> ProviderResult<Vec<DocumentEntry>> {
        (**self).list_documents()
    }

    fn load_document(&self, id: &DocumentId) -> ProviderResult<Arc<DeclarationDocument>> {
        (**self).load_document(id)
    }

    fn request_reindex(&self) {
        (**self).request_reindex();
    }

    fn generation(&self) -> Option<u64> {
        (**self).generation()
    }
}

#[derive(Debug, Clone)]
enum Stored {
    Parsed(Arc<DeclarationDocument>),
    Malformed(String),
}

#[derive(Debug, Default)]
struct State {
    documents: BTreeMap<DocumentId, (DocumentStamp, Stored)>,
    unsettled: bool,
    inconsistent: Option<String>,
}

/// A [`DocumentProvider`] holding documents in memory.
///
/// Every upsert bumps the document's stamp, so replacing a document with
/// identical content still counts as a modification.
#[derive(Debug, Default)]
pub struct InMemoryDocumentProvider {
    state: Mutex<State>,
    generation: AtomicU64,
    reindex_requests: AtomicUsize,
    loads: AtomicUsize,
}

impl InMemoryDocumentProvider {
    /// Creates an empty, settled provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the state for a change that readers must observe.
    fn state_mut(&self) -> MutexGuard<'_, State> {
        let state = self.state();
        self.generation.fetch_add(1, Ordering::AcqRel);
        state
    }

    fn next_stamp(state: &State, id: &DocumentId, requested: DocumentStamp) -> DocumentStamp {
        match state.documents.get(id) {
            Some((previous, _)) => requested.max(previous.next()),
            None => requested.max(DocumentStamp::new(1)),
        }
    }

    /// Inserts or replaces a document and returns its new stamp.
    pub fn upsert(&self, document: DeclarationDocument) -> DocumentStamp {
        let mut state = self.state_mut();
        let stamp = Self::next_stamp(&state, &document.id, document.stamp);
        let id = document.id.clone();
        let document = Arc::new(document.with_stamp(stamp));
        debug!(document = %id, %stamp, "document stored");
        state.documents.insert(id, (stamp, Stored::Parsed(document)));
        stamp
    }

    /// Stores raw JSON for `id`. Unparseable content is kept and reported as
    /// malformed on load, the way an editor buffer with syntax errors would.
    pub fn upsert_json(&self, id: DocumentId, json: &str) -> DocumentStamp {
        let mut state = self.state_mut();
        let stamp = Self::next_stamp(&state, &id, DocumentStamp::default());
        let stored = match DeclarationDocument::from_json(json) {
            Ok(document) => Stored::Parsed(Arc::new(DeclarationDocument {
                id: id.clone(),
                ..document.with_stamp(stamp)
            })),
            Err(e) => Stored::Malformed(e.to_string()),
        };
        state.documents.insert(id, (stamp, stored));
        stamp
    }

    /// Removes a document. Returns false when it was not present.
    pub fn remove(&self, id: &DocumentId) -> bool {
        self.state_mut().documents.remove(id).is_some()
    }

    pub fn set_settled(&self, settled: bool) {
        self.state_mut().unsettled = !settled;
    }

    /// Makes listing and loading fail with [`ProviderError::Inconsistent`]
    /// until [`Self::mark_consistent`] is called.
    pub fn mark_inconsistent(&self, reason: impl Into<String>) {
        self.state_mut().inconsistent = Some(reason.into());
    }

    pub fn mark_consistent(&self) {
        self.state_mut().inconsistent = None;
    }

    /// Number of [`DocumentProvider::request_reindex`] calls so far.
    #[must_use]
    pub fn reindex_requests(&self) -> usize {
        self.reindex_requests.load(Ordering::Relaxed)
    }

    /// Number of successful and failed `load_document` calls so far.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state().documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentProvider for InMemoryDocumentProvider {
    fn is_settled(&self) -> bool {
        !self.state().unsettled
    }

    fn list_documents(&self) -> ProviderResult<Vec<DocumentEntry>> {
        let state = self.state();
        if let Some(reason) = &state.inconsistent {
            return Err(ProviderError::Inconsistent(reason.clone()));
        }
        Ok(state
            .documents
            .iter()
            .map(|(id, (stamp, _))| DocumentEntry::new(id.clone(), *stamp))
            .collect())
    }

    fn load_document(&self, id: &DocumentId) -> ProviderResult<Arc<DeclarationDocument>> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        let state = self.state();
        if let Some(reason) = &state.inconsistent {
            return Err(ProviderError::Inconsistent(reason.clone()));
        }
        match state.documents.get(id) {
            Some((_, Stored::Parsed(document))) => Ok(Arc::clone(document)),
            Some((_, Stored::Malformed(reason))) => Err(ProviderError::Malformed {
                document: id.clone(),
                reason: reason.clone(),
            }),
            None => Err(ProviderError::NotFound(id.clone())),
        }
    }

    fn request_reindex(&self) {
        self.reindex_requests.fetch_add(1, Ordering::Relaxed);
    }

    fn generation(&self) -> Option<u64> {
        Some(self.generation.load(Ordering::Acquire))
    }
}
