//! Bean-system entities.

use metamodel_types::{Name, NameMap};
use std::ops::Deref;

use super::EntityHeader;

#[derive(Debug, Clone, PartialEq)]
pub struct MetaBean {
    pub header: EntityHeader,
    pub extends: Option<String>,
    pub template: Option<String>,
    pub is_abstract: Option<bool>,
    pub deprecated: Option<bool>,
    pub deprecated_since: Option<String>,
    pub super_equals: Option<bool>,
    pub description: Option<String>,
    pub imports: NameMap<MetaImport>,
    pub annotations: Vec<MetaAnnotation>,
    pub properties: NameMap<MetaBeanProperty>,
    pub hints: NameMap<MetaHint>,
}

impl MetaBean {
    /// Class name of the supertype with generic arguments stripped.
    #[must_use]
    pub fn extends_class(&self) -> Option<&str> {
        self.extends
            .as_deref()
            .map(|raw| raw.split('<').next().unwrap_or(raw).trim())
            .filter(|s| !s.is_empty())
    }
}

/// An event bean. Same shape as [`MetaBean`], stored under its own kind.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaEvent(pub MetaBean);

impl Deref for MetaEvent {
    type Target = MetaBean;

    fn deref(&self) -> &MetaBean {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaImport {
    pub type_name: Name,
    pub is_static: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnnotationScope {
    #[default]
    All,
    Getter,
    Setter,
}

impl AnnotationScope {
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("getter") => AnnotationScope::Getter,
            Some(s) if s.eq_ignore_ascii_case("setter") => AnnotationScope::Setter,
            _ => AnnotationScope::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaAnnotation {
    pub value: String,
    pub scope: AnnotationScope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaHint {
    pub name: Name,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaBeanProperty {
    pub name: Name,
    pub type_name: Option<String>,
    pub equals: bool,
    pub deprecated: bool,
    pub deprecated_since: Option<String>,
    pub description: Option<String>,
    pub annotations: Vec<MetaAnnotation>,
    pub hints: NameMap<MetaHint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaBeanEnum {
    pub header: EntityHeader,
    pub template: Option<String>,
    pub deprecated: bool,
    pub deprecated_since: Option<String>,
    pub description: Option<String>,
    pub values: NameMap<MetaBeanEnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaBeanEnumValue {
    pub value: Name,
}
