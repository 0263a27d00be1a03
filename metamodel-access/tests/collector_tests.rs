use metamodel_access::{
    Collector, DocumentEntry, DocumentProvider, InMemoryDocumentProvider, ProviderError,
    ProviderResult,
};
use metamodel_decl::{DeclarationDocument, ItemTypeNode, ItemsDecl};
use metamodel_types::{DocumentId, DocumentStamp, ModuleName};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn id(s: &str) -> DocumentId {
    DocumentId::new(s).unwrap()
}

fn entry(s: &str, stamp: u64) -> DocumentEntry {
    DocumentEntry::new(id(s), DocumentStamp::new(stamp))
}

fn items_doc(document: &str, code: &str) -> DeclarationDocument {
    DeclarationDocument::type_system(
        id(document),
        ModuleName::new("core").unwrap(),
        false,
        ItemsDecl {
            item_types: vec![ItemTypeNode::new(code)],
            ..Default::default()
        },
    )
}

/// Provider returning a fixed listing, duplicates included.
struct ListingProvider {
    listing: Vec<DocumentEntry>,
    reindex: AtomicUsize,
}

impl DocumentProvider for ListingProvider {
    fn is_settled(&self) -> bool {
        true
    }

    fn list_documents(&self) -> ProviderResult<Vec<DocumentEntry>> {
        Ok(self.listing.clone())
    }

    fn load_document(&self, id: &DocumentId) -> ProviderResult<Arc<DeclarationDocument>> {
        Err(ProviderError::NotFound(id.clone()))
    }

    fn request_reindex(&self) {
        self.reindex.fetch_add(1, Ordering::Relaxed);
    }
}

// ── Collect ──────────────────────────────────────────────────────

#[test]
fn collect_sorts_and_keeps_highest_stamp() {
    let provider = ListingProvider {
        listing: vec![
            entry("b.xml", 2),
            entry("a.xml", 1),
            entry("b.xml", 5),
            entry("b.xml", 3),
        ],
        reindex: AtomicUsize::new(0),
    };
    let collection = Collector::collect(&provider);

    assert!(collection.consistent);
    assert_eq!(collection.entries, vec![entry("a.xml", 1), entry("b.xml", 5)]);
    assert_eq!(provider.reindex.load(Ordering::Relaxed), 0);
}

#[test]
fn collect_reports_inconsistent_index_without_error() {
    let provider = InMemoryDocumentProvider::new();
    provider.upsert(items_doc("a.xml", "Product"));
    provider.mark_inconsistent("reindexing");

    let collection = Collector::collect(&provider);
    assert!(!collection.consistent);
    assert!(collection.is_empty());
    assert_eq!(provider.reindex_requests(), 1);

    provider.mark_consistent();
    let collection = Collector::collect(&provider);
    assert!(collection.consistent);
    assert_eq!(collection.len(), 1);
}

#[test]
fn collect_through_shared_provider() {
    let provider = Arc::new(InMemoryDocumentProvider::new());
    provider.upsert(items_doc("a.xml", "Product"));
    assert_eq!(Collector::collect(&provider).len(), 1);
}

// ── Load ─────────────────────────────────────────────────────────

#[test]
fn load_returns_parsed_document() {
    let provider = InMemoryDocumentProvider::new();
    let stamp = provider.upsert(items_doc("a.xml", "Product"));

    let document = Collector::load(&provider, &DocumentEntry::new(id("a.xml"), stamp))
        .unwrap()
        .unwrap();
    assert_eq!(document.stamp, stamp);
    assert_eq!(provider.load_count(), 1);
}

#[test]
fn load_skips_malformed_and_missing_documents() {
    let provider = InMemoryDocumentProvider::new();
    let stamp = provider.upsert_json(id("broken.xml"), "{ not json");

    assert_eq!(
        Collector::load(&provider, &DocumentEntry::new(id("broken.xml"), stamp)).unwrap(),
        None
    );
    assert_eq!(Collector::load(&provider, &entry("gone.xml", 1)).unwrap(), None);
}

#[test]
fn load_propagates_inconsistent_index() {
    let provider = InMemoryDocumentProvider::new();
    provider.upsert(items_doc("a.xml", "Product"));
    provider.mark_inconsistent("reindexing");

    let err = Collector::load(&provider, &entry("a.xml", 1)).unwrap_err();
    assert_eq!(err, ProviderError::Inconsistent("reindexing".into()));
    assert_eq!(provider.reindex_requests(), 1);
}

// ── In-memory provider ───────────────────────────────────────────

#[test]
fn upsert_bumps_stamp_on_every_write() {
    let provider = InMemoryDocumentProvider::new();
    let first = provider.upsert(items_doc("a.xml", "Product"));
    let second = provider.upsert(items_doc("a.xml", "Product"));
    assert!(second > first);

    let explicit =
        provider.upsert(items_doc("a.xml", "Product").with_stamp(DocumentStamp::new(40)));
    assert_eq!(explicit, DocumentStamp::new(40));

    assert!(provider.remove(&id("a.xml")));
    assert!(!provider.remove(&id("a.xml")));
    assert!(provider.is_empty());
}

#[test]
fn generation_moves_on_every_change() {
    let provider = InMemoryDocumentProvider::new();
    let start = provider.generation().unwrap();

    provider.upsert(items_doc("a.xml", "Product"));
    let after_upsert = provider.generation().unwrap();
    assert!(after_upsert > start);

    provider.list_documents().unwrap();
    provider.load_document(&id("a.xml")).unwrap();
    provider.request_reindex();
    assert_eq!(provider.generation(), Some(after_upsert));

    provider.mark_inconsistent("reindexing");
    provider.mark_consistent();
    provider.set_settled(false);
    assert!(provider.remove(&id("a.xml")));
    assert_eq!(provider.generation(), Some(after_upsert + 4));
}

#[test]
fn upsert_json_uses_given_id() {
    let provider = InMemoryDocumentProvider::new();
    let json = r#"{
        "id": "other.xml",
        "module": "core",
        "root": { "family": "type_system", "item_types": [ { "code": "Unit" } ] }
    }"#;
    let stamp = provider.upsert_json(id("units.xml"), json);

    let document = provider.load_document(&id("units.xml")).unwrap();
    assert_eq!(document.id, id("units.xml"));
    assert_eq!(document.stamp, stamp);
}
