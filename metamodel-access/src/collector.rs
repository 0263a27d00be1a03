//! Enumerates the current document set.

use metamodel_decl::DeclarationDocument;
use metamodel_types::{DocumentId, DocumentStamp};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{DocumentEntry, DocumentProvider};

/// Snapshot of the document set.
///
/// `entries` is sorted by document id with one entry per id, which makes it
/// usable directly as the fingerprint of the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    pub entries: Vec<DocumentEntry>,
    /// False when the provider's index was inconsistent; `entries` is empty.
    pub consistent: bool,
}

impl Collection {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct Collector;

impl Collector {
    /// Lists every document the provider knows about.
    ///
    /// An inconsistent index is not an error: a reindex is requested and an
    /// empty, inconsistent collection is returned so callers can report
    /// "not ready".
    pub fn collect<P: DocumentProvider + ?Sized>(provider: &P) -> Collection {
        match provider.list_documents() {
            Ok(listed) => {
                let mut latest: BTreeMap<DocumentId, DocumentStamp> = BTreeMap::new();
                for entry in listed {
                    let stamp = latest.entry(entry.id).or_insert(entry.stamp);
                    *stamp = (*stamp).max(entry.stamp);
                }
                let entries: Vec<DocumentEntry> = latest
                    .into_iter()
                    .map(|(id, stamp)| DocumentEntry::new(id, stamp))
                    .collect();
                trace!(documents = entries.len(), "collected document set");
                Collection {
                    entries,
                    consistent: true,
                }
            }
            Err(e) => {
                warn!(error = %e, "document index unavailable, requesting reindex");
                provider.request_reindex();
                Collection {
                    entries: Vec::new(),
                    consistent: false,
                }
            }
        }
    }

    /// Loads one listed document.
    ///
    /// Malformed and vanished documents are logged and skipped (`Ok(None)`).
    /// An inconsistent index invalidates the whole pass: a reindex is
    /// requested and the error is returned.
    pub fn load<P: DocumentProvider + ?Sized>(
        provider: &P,
        entry: &DocumentEntry,
    ) -> ProviderResult<Option<Arc<DeclarationDocument>>> {
        match provider.load_document(&entry.id) {
            Ok(document) => Ok(Some(document)),
            Err(e @ ProviderError::Inconsistent(_)) => {
                warn!(
                    document = %entry.id,
                    error = %e,
                    "document index inconsistent, requesting reindex"
                );
                provider.request_reindex();
                Err(e)
            }
            Err(e @ ProviderError::Malformed { .. }) => {
                warn!(
                    document = %entry.id,
                    stamp = %entry.stamp,
                    error = %e,
                    "skipping malformed document"
                );
                Ok(None)
            }
            Err(e @ ProviderError::NotFound(_)) => {
                debug!(document = %entry.id, error = %e, "document vanished before load");
                Ok(None)
            }
        }
    }
}
