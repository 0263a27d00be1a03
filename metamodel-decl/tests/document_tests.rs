use metamodel_decl::{
    AttributeNode, BeanNode, BeansDecl, DeclError, DeclarationDocument, DeclarationNode,
    DeclarationRoot, ItemTypeNode, ItemsDecl, RelationElementNode,
};
use metamodel_types::{DocumentId, DocumentStamp, Family, ModuleName};
use pretty_assertions::assert_eq;

fn doc_id(s: &str) -> DocumentId {
    DocumentId::new(s).unwrap()
}

fn module(s: &str) -> ModuleName {
    ModuleName::new(s).unwrap()
}

// ── JSON loading ─────────────────────────────────────────────────

#[test]
fn loads_type_system_document_from_json() {
    let json = r#"{
        "id": "core/core-items.xml",
        "module": "core",
        "stamp": 3,
        "root": {
            "family": "type_system",
            "item_types": [
                {
                    "code": "Product",
                    "extends": "GenericItem",
                    "abstract": false,
                    "deployment": { "table": "products", "typecode": "1" },
                    "attributes": [
                        { "qualifier": "code", "type": "java.lang.String",
                          "modifiers": { "unique": true, "optional": false } }
                    ]
                }
            ]
        }
    }"#;

    let doc = DeclarationDocument::from_json(json).unwrap();
    assert_eq!(doc.id, doc_id("core/core-items.xml"));
    assert_eq!(doc.module, module("core"));
    assert!(!doc.custom);
    assert_eq!(doc.stamp, DocumentStamp::new(3));
    assert_eq!(doc.family(), Family::TypeSystem);

    let items = doc.items().unwrap();
    assert_eq!(items.item_types.len(), 1);
    let product = &items.item_types[0];
    assert_eq!(product.code.as_deref(), Some("Product"));
    assert_eq!(product.is_abstract, Some(false));
    assert_eq!(
        product.deployment.as_ref().and_then(|d| d.typecode.as_deref()),
        Some("1")
    );
    let code = &product.attributes[0];
    assert_eq!(code.type_name.as_deref(), Some("java.lang.String"));
    assert_eq!(code.modifiers.as_ref().and_then(|m| m.unique), Some(true));
}

#[test]
fn loads_bean_system_document_from_json() {
    let json = r#"{
        "id": "facades/beans.xml",
        "module": "commercefacades",
        "custom": true,
        "root": {
            "family": "bean_system",
            "beans": [
                { "class": "de.hybris.ProductData", "type": "bean",
                  "properties": [ { "name": "code", "type": "String" } ] }
            ],
            "enums": [ { "class": "de.hybris.Stock", "values": [ { "value": "IN" } ] } ]
        }
    }"#;

    let doc = DeclarationDocument::from_json(json).unwrap();
    assert!(doc.custom);
    assert_eq!(doc.stamp, DocumentStamp::default());
    let beans = doc.beans().unwrap();
    assert_eq!(beans.beans.len(), 1);
    assert_eq!(beans.enums[0].values[0].value.as_deref(), Some("IN"));
    assert!(beans.events.is_empty());
}

#[test]
fn malformed_json_is_an_error() {
    let err = DeclarationDocument::from_json("{ not json").unwrap_err();
    assert!(matches!(err, DeclError::Malformed(_)));
}

#[test]
fn blank_document_id_is_rejected() {
    let json = r#"{ "id": " ", "module": "core", "root": { "family": "type_system" } }"#;
    assert!(DeclarationDocument::from_json(json).is_err());
}

#[test]
fn json_roundtrip_preserves_document() {
    let doc = DeclarationDocument::type_system(
        doc_id("a.xml"),
        module("core"),
        false,
        ItemsDecl {
            item_types: vec![ItemTypeNode::new("Product")
                .with_attribute(AttributeNode::new("code", "java.lang.String"))],
            ..Default::default()
        },
    )
    .with_stamp(DocumentStamp::new(9));

    let json = doc.to_json().unwrap();
    assert_eq!(DeclarationDocument::from_json(&json).unwrap(), doc);
}

// ── Family accessors ─────────────────────────────────────────────

#[test]
fn family_accessors_reject_the_other_family() {
    let doc = DeclarationDocument::bean_system(
        doc_id("beans.xml"),
        module("core"),
        false,
        BeansDecl::default(),
    );
    assert!(matches!(doc.root, DeclarationRoot::BeanSystem(_)));
    assert!(doc.beans().is_ok());
    assert!(matches!(
        doc.items(),
        Err(DeclError::FamilyMismatch { .. })
    ));
}

// ── DeclarationNode ──────────────────────────────────────────────

#[test]
fn name_attribute_per_variant() {
    let item = ItemTypeNode::new("Product");
    let attribute = AttributeNode::new("code", "String");
    let bean = BeanNode::new("com.acme.Data");
    let element = RelationElementNode::new("Product", "entries", "many");

    assert_eq!(DeclarationNode::Item(&item).name_attribute(), Some("Product"));
    assert_eq!(DeclarationNode::Attribute(&attribute).name_attribute(), Some("code"));
    assert_eq!(DeclarationNode::Bean(&bean).name_attribute(), Some("com.acme.Data"));
    assert_eq!(DeclarationNode::Event(&bean).name_attribute(), Some("com.acme.Data"));
    assert_eq!(
        DeclarationNode::RelationElement(&element).name_attribute(),
        Some("entries")
    );
}

#[test]
fn missing_name_attribute_is_none() {
    let item = ItemTypeNode::default();
    assert_eq!(DeclarationNode::Item(&item).name_attribute(), None);
    assert_eq!(DeclarationNode::Item(&item).label(), "item");
}
