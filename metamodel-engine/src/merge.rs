//! Folds local models into the global model.

use metamodel_types::{DocumentId, Name, NameMap};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::global::{GlobalEntity, GlobalMetaModel, RelationEndRef};
use crate::local::LocalMetaModel;
use crate::meta::{
    MetaAtomic, MetaBean, MetaBeanEnum, MetaCollection, MetaEntity, MetaEnum, MetaEvent, MetaItem,
    MetaMap, MetaRelation, RelationDirection, RelationEnd,
};

/// Merges every local model into one [`GlobalMetaModel`].
///
/// Custom documents take precedence over out-of-the-box ones; within each
/// group documents are ordered by `(module, document id)`, so the result
/// does not depend on the order of `locals`. Declarations sharing a name
/// are all kept, highest precedence first. A document id appearing twice
/// contributes only once.
#[must_use]
pub fn merge(locals: &[Arc<LocalMetaModel>]) -> GlobalMetaModel {
    let mut ordered: Vec<&Arc<LocalMetaModel>> = locals.iter().collect();
    ordered.sort_by(|a, b| {
        b.is_custom()
            .cmp(&a.is_custom())
            .then_with(|| a.module().cmp(b.module()))
            .then_with(|| a.document().cmp(b.document()))
            .then_with(|| b.stamp().cmp(&a.stamp()))
    });

    let mut global = GlobalMetaModel::new();
    let mut seen: HashSet<&DocumentId> = HashSet::new();
    for local in ordered {
        if !seen.insert(local.document()) {
            warn!(
                document = %local.document(),
                stamp = %local.stamp(),
                "document already merged, skipping duplicate"
            );
            continue;
        }
        accumulate::<MetaItem>(&mut global, local);
        accumulate::<MetaEnum>(&mut global, local);
        accumulate::<MetaRelation>(&mut global, local);
        accumulate::<MetaCollection>(&mut global, local);
        accumulate::<MetaMap>(&mut global, local);
        accumulate::<MetaAtomic>(&mut global, local);
        accumulate::<MetaBean>(&mut global, local);
        accumulate::<MetaEvent>(&mut global, local);
        accumulate::<MetaBeanEnum>(&mut global, local);
        global.documents.push(local.document().clone());
        debug!(
            document = %local.document(),
            module = %local.module(),
            custom = local.is_custom(),
            entities = local.len(),
            "merged local model"
        );
    }

    global.reverse_relation_ends = reverse_relation_ends(&global);

    info!(
        documents = global.documents.len(),
        items = global.items.len(),
        relations = global.relations.len(),
        beans = global.beans.len(),
        "global meta-model merged"
    );
    global
}

fn accumulate<T: MetaEntity>(global: &mut GlobalMetaModel, local: &LocalMetaModel) {
    let target = T::global_map_mut(global);
    for (name, entity) in T::local_map(local).iter() {
        match target.get_mut(name.as_str()) {
            Some(existing) => existing.push(Arc::clone(entity)),
            None => {
                target.insert(name.clone(), GlobalEntity::new(Arc::clone(entity)));
            }
        }
    }
}

/// Indexes every navigable end under the type it is reached from.
fn reverse_relation_ends(global: &GlobalMetaModel) -> NameMap<Vec<RelationEndRef>> {
    let mut index: NameMap<Vec<RelationEndRef>> = NameMap::new();
    for relation in global.relations.values() {
        let ends = (
            relation.end(RelationDirection::Source),
            relation.end(RelationDirection::Target),
        );
        let (Some(source), Some(target)) = ends else {
            debug!(relation = %relation.name(), "relation lacks an end, not navigable");
            continue;
        };
        register(&mut index, &source.owner_type, target);
        register(&mut index, &target.owner_type, source);
    }
    index
}

fn register(index: &mut NameMap<Vec<RelationEndRef>>, from: &Name, end: &RelationEnd) {
    if !end.navigable {
        return;
    }
    let end_ref = RelationEndRef {
        relation: end.relation.clone(),
        direction: end.direction,
    };
    let ends = index.get_or_insert_with(from, Vec::new);
    if !ends.contains(&end_ref) {
        ends.push(end_ref);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{DeclarationSource, EntityHeader};
    use metamodel_types::{DocumentStamp, Family, ModuleName};

    fn local(document: &str, custom: bool, items: &[&str]) -> Arc<LocalMetaModel> {
        let source = DeclarationSource {
            document: DocumentId::new(document).unwrap(),
            module: ModuleName::new("core").unwrap(),
            custom,
        };
        let mut model =
            LocalMetaModel::empty(source.clone(), DocumentStamp::new(1), Family::TypeSystem);
        for item in items {
            let name = Name::parse(item).unwrap();
            model.items.insert(
                name.clone(),
                Arc::new(MetaItem {
                    header: EntityHeader {
                        name,
                        source: source.clone(),
                    },
                    extends: None,
                    jalo_class: None,
                    metatype: None,
                    description: None,
                    is_abstract: None,
                    autocreate: None,
                    generate: None,
                    singleton: None,
                    jalo_only: None,
                    deployment: None,
                    custom_properties: NameMap::new(),
                    attributes: NameMap::new(),
                    indexes: NameMap::new(),
                }),
            );
        }
        Arc::new(model)
    }

    #[test]
    fn duplicate_documents_contribute_once() {
        let a = local("a.xml", false, &["Product"]);
        let global = merge(&[Arc::clone(&a), a]);
        assert_eq!(global.documents().len(), 1);
        assert_eq!(global.find::<MetaItem>("Product").unwrap().declarations().len(), 1);
    }

    #[test]
    fn custom_declaration_is_primary() {
        let ootb = local("a.xml", false, &["Product"]);
        let custom = local("z.xml", true, &["product"]);
        let global = merge(&[ootb, custom]);
        let product = global.find::<MetaItem>("PRODUCT").unwrap();
        assert!(product.is_custom());
        assert_eq!(product.name().as_str(), "product");
        assert_eq!(product.declarations().len(), 2);
    }
}
