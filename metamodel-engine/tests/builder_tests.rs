use metamodel_decl::{
    AttributeNode, BeanEnumNode, BeanEnumValueNode, BeanNode, BeansDecl, CustomPropertyNode,
    DeclarationDocument, DeploymentNode, EnumTypeNode, IndexKeyNode, IndexNode, ItemTypeNode,
    ItemsDecl, ModifiersNode, RelationElementNode, RelationNode, TypeGroupNode,
};
use metamodel_engine::{
    Cardinality, CollectionType, LocalModelBuilder, MetaBean, MetaBeanEnum, MetaEnum, MetaEvent,
    MetaItem, MetaRelation, ORDERING_ATTRIBUTE_TYPE, RelationDirection,
};
use metamodel_types::{DocumentId, DocumentStamp, Family, MetaKind, ModuleName};
use pretty_assertions::assert_eq;

fn items_doc(id: &str, items: ItemsDecl) -> DeclarationDocument {
    DeclarationDocument::type_system(
        DocumentId::new(id).unwrap(),
        ModuleName::new("core").unwrap(),
        false,
        items,
    )
}

fn beans_doc(id: &str, beans: BeansDecl) -> DeclarationDocument {
    DeclarationDocument::bean_system(
        DocumentId::new(id).unwrap(),
        ModuleName::new("commerce").unwrap(),
        true,
        beans,
    )
}

// ── Envelope ─────────────────────────────────────────────────────

#[test]
fn local_model_carries_document_envelope() {
    let doc = items_doc("core-items.xml", ItemsDecl::default()).with_stamp(DocumentStamp::new(7));
    let local = LocalModelBuilder::build_document(&doc);

    assert_eq!(local.document().as_str(), "core-items.xml");
    assert_eq!(local.module().as_str(), "core");
    assert!(!local.is_custom());
    assert_eq!(local.stamp(), DocumentStamp::new(7));
    assert_eq!(local.family(), Family::TypeSystem);
    assert!(local.is_empty());
}

#[test]
fn build_is_deterministic() {
    let doc = items_doc(
        "core-items.xml",
        ItemsDecl {
            item_types: vec![
                ItemTypeNode::new("Product")
                    .with_attribute(AttributeNode::new("code", "java.lang.String")),
                ItemTypeNode::new("Category"),
            ],
            enum_types: vec![EnumTypeNode::new("ArticleStatus", &["NEW", "OLD"])],
            ..Default::default()
        },
    );
    assert_eq!(
        LocalModelBuilder::build_document(&doc),
        LocalModelBuilder::build_document(&doc)
    );
}

// ── Naming ───────────────────────────────────────────────────────

#[test]
fn unnamed_nodes_are_skipped_without_affecting_siblings() {
    let doc = items_doc(
        "core-items.xml",
        ItemsDecl {
            item_types: vec![
                ItemTypeNode::new("   "),
                ItemTypeNode::new("Product")
                    .with_attribute(AttributeNode::new("", "java.lang.String"))
                    .with_attribute(AttributeNode::new("name", "localized:java.lang.String")),
                ItemTypeNode::default(),
            ],
            ..Default::default()
        },
    );
    let local = LocalModelBuilder::build_document(&doc);

    let names: Vec<&str> = local.names(MetaKind::Item).iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["Product"]);

    let product = local.find::<MetaItem>("product").unwrap();
    let qualifiers: Vec<&str> = product.attributes.names().map(|n| n.as_str()).collect();
    assert_eq!(qualifiers, vec!["name"]);
    assert!(product.attribute("NAME").unwrap().is_localized());
}

#[test]
fn later_duplicate_replaces_earlier_in_place() {
    let doc = items_doc(
        "core-items.xml",
        ItemsDecl {
            item_types: vec![
                ItemTypeNode::new("Product")
                    .with_attribute(AttributeNode::new("code", "java.lang.String"))
                    .with_attribute(AttributeNode::new("price", "java.lang.Double"))
                    .with_attribute(AttributeNode::new("CODE", "java.lang.Integer")),
                ItemTypeNode::new("Unit"),
            ],
            ..Default::default()
        },
    );
    let local = LocalModelBuilder::build_document(&doc);
    let product = local.find::<MetaItem>("Product").unwrap();

    let qualifiers: Vec<&str> = product.attributes.names().map(|n| n.as_str()).collect();
    assert_eq!(qualifiers, vec!["CODE", "price"]);
    assert_eq!(
        product.attribute("code").unwrap().type_name.as_deref(),
        Some("java.lang.Integer")
    );
}

#[test]
fn type_group_items_are_flattened_in_order() {
    let doc = items_doc(
        "core-items.xml",
        ItemsDecl {
            item_types: vec![ItemTypeNode::new("Product")],
            type_groups: vec![TypeGroupNode {
                name: Some("Media".into()),
                item_types: vec![ItemTypeNode::new("Media"), ItemTypeNode::new("MediaFolder")],
            }],
            ..Default::default()
        },
    );
    let local = LocalModelBuilder::build_document(&doc);
    let names: Vec<&str> = local.names(MetaKind::Item).iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["Product", "Media", "MediaFolder"]);
}

// ── Item details ─────────────────────────────────────────────────

#[test]
fn item_details_are_trimmed_and_defaulted() {
    let mut attribute = AttributeNode::new("code", "java.lang.String");
    attribute.modifiers = Some(ModifiersNode {
        unique: Some(true),
        optional: Some(false),
        ..Default::default()
    });
    let mut product = ItemTypeNode::new("Product").with_attribute(attribute);
    product.description = Some("   ".into());
    product.deployment = Some(DeploymentNode {
        table: Some(" products ".into()),
        typecode: Some("1".into()),
        properties_table: None,
    });
    product.custom_properties = vec![CustomPropertyNode {
        name: Some("catalogItemType".into()),
        value: Some("true".into()),
    }];
    product.indexes = vec![IndexNode {
        name: Some("Product_Code".into()),
        unique: Some(true),
        keys: vec![
            IndexKeyNode {
                attribute: Some("code".into()),
                lower: None,
            },
            IndexKeyNode {
                attribute: Some(" ".into()),
                lower: Some(true),
            },
        ],
        ..Default::default()
    }];

    let local = LocalModelBuilder::build_document(&items_doc(
        "core-items.xml",
        ItemsDecl {
            item_types: vec![product],
            ..Default::default()
        },
    ));
    let product = local.find::<MetaItem>("Product").unwrap();

    assert_eq!(product.description, None);
    assert_eq!(product.is_abstract, None);
    let deployment = product.deployment.as_ref().unwrap();
    assert_eq!(deployment.table.as_deref(), Some("products"));
    assert_eq!(deployment.typecode.as_deref(), Some("1"));

    let code = product.attribute("code").unwrap();
    assert!(code.modifiers.unique);
    assert!(!code.modifiers.optional);
    assert!(code.modifiers.read);
    assert!(code.autocreate);

    let index = product.indexes.get("product_code").unwrap();
    assert!(index.unique);
    assert_eq!(index.keys.len(), 1);
    assert_eq!(
        product
            .custom_properties
            .get("catalogitemtype")
            .and_then(|p| p.value.as_deref()),
        Some("true")
    );
}

#[test]
fn empty_deployment_is_dropped() {
    let mut product = ItemTypeNode::new("Product");
    product.deployment = Some(DeploymentNode::default());
    let local = LocalModelBuilder::build_document(&items_doc(
        "core-items.xml",
        ItemsDecl {
            item_types: vec![product],
            ..Default::default()
        },
    ));
    assert_eq!(local.find::<MetaItem>("Product").unwrap().deployment, None);
}

#[test]
fn enum_values_skip_blank_codes() {
    let local = LocalModelBuilder::build_document(&items_doc(
        "core-items.xml",
        ItemsDecl {
            enum_types: vec![EnumTypeNode::new("ArticleStatus", &["NEW", " ", "old", "New"])],
            ..Default::default()
        },
    ));
    let status = local.find::<MetaEnum>("articlestatus").unwrap();
    let codes: Vec<&str> = status.values.names().map(|n| n.as_str()).collect();
    assert_eq!(codes, vec!["New", "old"]);
    assert_eq!(status.dynamic, None);
}

// ── Relations ────────────────────────────────────────────────────

#[test]
fn relation_ends_are_built_with_defaults() {
    let local = LocalModelBuilder::build_document(&items_doc(
        "core-items.xml",
        ItemsDecl {
            relations: vec![RelationNode::new(
                "CategoryProductRelation",
                RelationElementNode::new("Category", "supercategories", "many"),
                RelationElementNode::new("Product", "products", "MANY"),
            )],
            ..Default::default()
        },
    ));
    let relation = local.find::<MetaRelation>("CategoryProductRelation").unwrap();
    let source = relation.end(RelationDirection::Source).unwrap();
    let target = relation.end(RelationDirection::Target).unwrap();

    assert_eq!(source.owner_type.as_str(), "Category");
    assert_eq!(source.qualifier.as_ref().unwrap().as_str(), "supercategories");
    assert_eq!(target.cardinality, Cardinality::Many);
    assert!(target.navigable);
    assert!(!target.ordered);
    assert_eq!(target.collection_type, CollectionType::Collection);
    assert!(relation.is_many_to_many());
    assert!(relation.ordering_attributes.is_empty());
}

#[test]
fn relation_end_without_type_is_omitted() {
    let mut target = RelationElementNode::new("  ", "products", "many");
    target.navigable = Some(false);
    let mut relation = RelationNode::new(
        "CatalogProducts",
        RelationElementNode::new("Catalog", "catalog", "one"),
        target,
    );
    relation.description = Some("links".into());
    let mut unqualified = RelationNode::new(
        "Half",
        RelationElementNode::new("Unit", " ", "one"),
        RelationElementNode::default(),
    );
    unqualified.target_element = None;

    let local = LocalModelBuilder::build_document(&items_doc(
        "core-items.xml",
        ItemsDecl {
            relations: vec![relation, unqualified],
            ..Default::default()
        },
    ));

    let catalog = local.find::<MetaRelation>("CatalogProducts").unwrap();
    assert!(catalog.target.is_none());
    assert_eq!(catalog.source.as_ref().unwrap().cardinality, Cardinality::One);

    let half = local.find::<MetaRelation>("Half").unwrap();
    assert!(half.target.is_none());
    assert_eq!(half.source.as_ref().unwrap().qualifier, None);
}

#[test]
fn ordered_many_end_derives_position_attribute() {
    let mut target = RelationElementNode::new("Product", "products", "many");
    target.ordered = Some(true);
    let mut source = RelationElementNode::new("Category", "", "many");
    source.ordered = Some(true);
    let local = LocalModelBuilder::build_document(&items_doc(
        "core-items.xml",
        ItemsDecl {
            relations: vec![RelationNode::new("CategoryProductRelation", source, target)],
            ..Default::default()
        },
    ));
    let relation = local.find::<MetaRelation>("CategoryProductRelation").unwrap();

    let attributes: Vec<(&str, &str, &str)> = relation
        .ordering_attributes
        .iter()
        .map(|a| (a.owner_type.as_str(), a.qualifier.as_str(), a.type_name.as_str()))
        .collect();
    assert_eq!(
        attributes,
        vec![
            ("Category", "CategoryProductRelationPOS", ORDERING_ATTRIBUTE_TYPE),
            ("Product", "productsPOS", ORDERING_ATTRIBUTE_TYPE),
        ]
    );
}

// ── Bean system ──────────────────────────────────────────────────

#[test]
fn beans_events_and_enums_are_separated() {
    let mut typed_event = BeanNode::new("de.hybris.OrderPlacedEvent");
    typed_event.bean_type = Some("Event".into());
    let local = LocalModelBuilder::build_document(&beans_doc(
        "commerce-beans.xml",
        BeansDecl {
            beans: vec![
                BeanNode::new("de.hybris.ProductData")
                    .with_property("code", "String")
                    .with_property(" ", "String"),
                typed_event,
            ],
            events: vec![BeanNode::new("de.hybris.CartEvent")],
            enums: vec![BeanEnumNode {
                class: Some("de.hybris.StockLevel".into()),
                values: vec![
                    BeanEnumValueNode {
                        value: Some("IN_STOCK".into()),
                    },
                    BeanEnumValueNode { value: None },
                ],
                ..Default::default()
            }],
        },
    ));

    assert_eq!(local.family(), Family::BeanSystem);
    assert!(local.is_custom());

    let product = local.find::<MetaBean>("de.hybris.productdata").unwrap();
    assert_eq!(product.properties.len(), 1);

    let events: Vec<&str> = local.names(MetaKind::Event).iter().map(|n| n.as_str()).collect();
    assert_eq!(events, vec!["de.hybris.OrderPlacedEvent", "de.hybris.CartEvent"]);
    assert!(local.find::<MetaEvent>("de.hybris.CartEvent").is_some());

    let stock = local.find::<MetaBeanEnum>("de.hybris.StockLevel").unwrap();
    assert_eq!(stock.values.len(), 1);
}

#[test]
fn bean_extends_strips_generics() {
    let mut bean = BeanNode::new("de.hybris.PageData");
    bean.extends = Some("de.hybris.BaseData<de.hybris.ProductData>".into());
    let local = LocalModelBuilder::build_document(&beans_doc(
        "commerce-beans.xml",
        BeansDecl {
            beans: vec![bean],
            ..Default::default()
        },
    ));
    let page = local.find::<MetaBean>("de.hybris.PageData").unwrap();
    assert_eq!(page.extends_class(), Some("de.hybris.BaseData"));
}
