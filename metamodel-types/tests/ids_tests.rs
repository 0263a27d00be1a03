use metamodel_types::{DocumentId, DocumentStamp, Family, MetaKind, ModuleName};
use std::collections::HashSet;
use std::str::FromStr;

// ── DocumentId ───────────────────────────────────────────────────

#[test]
fn document_id_rejects_blank() {
    assert!(DocumentId::new("").is_err());
    assert!(DocumentId::new("  ").is_err());
}

#[test]
fn document_id_display_roundtrip() {
    let id = DocumentId::new("core/resources/core-items.xml").unwrap();
    let parsed = DocumentId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn document_id_hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(DocumentId::new("a.xml").unwrap());
    set.insert(DocumentId::new("a.xml").unwrap());
    assert_eq!(set.len(), 1);
}

#[test]
fn document_id_orders_lexically() {
    let a = DocumentId::new("a.xml").unwrap();
    let b = DocumentId::new("b.xml").unwrap();
    assert!(a < b);
}

// ── DocumentStamp ────────────────────────────────────────────────

#[test]
fn stamp_next_increments() {
    let stamp = DocumentStamp::new(4);
    assert_eq!(stamp.next().value(), 5);
    assert!(stamp < stamp.next());
}

#[test]
fn stamp_next_saturates() {
    assert_eq!(DocumentStamp::new(u64::MAX).next().value(), u64::MAX);
}

// ── ModuleName ───────────────────────────────────────────────────

#[test]
fn module_name_is_trimmed() {
    assert_eq!(ModuleName::new(" core ").unwrap().as_str(), "core");
    assert!(ModuleName::new("").is_err());
}

// ── MetaKind ─────────────────────────────────────────────────────

#[test]
fn kind_families() {
    assert_eq!(MetaKind::Item.family(), Family::TypeSystem);
    assert_eq!(MetaKind::Atomic.family(), Family::TypeSystem);
    assert_eq!(MetaKind::Bean.family(), Family::BeanSystem);
    assert_eq!(MetaKind::BeanEnum.family(), Family::BeanSystem);
}

#[test]
fn kind_parse_roundtrip() {
    for kind in MetaKind::ALL {
        assert_eq!(MetaKind::from_str(kind.as_str()).unwrap(), kind);
    }
    assert_eq!(MetaKind::from_str("ITEM").unwrap(), MetaKind::Item);
    assert!(MetaKind::from_str("widget").is_err());
}
