//! Canonical names of declaration nodes.

use metamodel_decl::DeclarationNode;
use metamodel_types::Name;

/// Extracts the canonical name of `node`.
///
/// Reads the single attribute that names the variant (class, code, name,
/// qualifier, type or value), trims it and returns `None` when nothing is
/// left. Callers drop nodes without a name instead of failing: placeholder
/// declarations are normal while a document is being edited.
#[must_use]
pub fn extract_name(node: DeclarationNode<'_>) -> Option<Name> {
    node.name_attribute().and_then(Name::parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use metamodel_decl::{
        AnnotationNode, AtomicTypeNode, BeanEnumValueNode, HintNode, ImportNode, ItemTypeNode,
    };

    #[test]
    fn trims_designated_attribute() {
        let item = ItemTypeNode::new("  Product  ");
        let name = extract_name(DeclarationNode::Item(&item)).unwrap();
        assert_eq!(name.as_str(), "Product");
    }

    #[test]
    fn blank_and_absent_names_are_none() {
        let blank = ItemTypeNode::new(" \t ");
        let absent = ItemTypeNode::default();
        assert!(extract_name(DeclarationNode::Item(&blank)).is_none());
        assert!(extract_name(DeclarationNode::Item(&absent)).is_none());
    }

    #[test]
    fn uses_variant_specific_attribute() {
        let atomic = AtomicTypeNode {
            class: Some("java.lang.String".into()),
            extends: Some("java.lang.Object".into()),
            ..Default::default()
        };
        let import = ImportNode {
            type_name: Some("java.util.List".into()),
            is_static: None,
        };
        let hint = HintNode {
            name: Some("wsRelated".into()),
            value: Some("true".into()),
        };
        let annotation = AnnotationNode {
            value: Some("@Deprecated".into()),
            scope: None,
        };
        let value = BeanEnumValueNode {
            value: Some("IN_STOCK".into()),
        };

        let names: Vec<String> = [
            DeclarationNode::Atomic(&atomic),
            DeclarationNode::Import(&import),
            DeclarationNode::Hint(&hint),
            DeclarationNode::Annotation(&annotation),
            DeclarationNode::BeanEnumValue(&value),
        ]
        .into_iter()
        .filter_map(extract_name)
        .map(String::from)
        .collect();

        assert_eq!(
            names,
            vec!["java.lang.String", "java.util.List", "wsRelated", "@Deprecated", "IN_STOCK"]
        );
    }
}
