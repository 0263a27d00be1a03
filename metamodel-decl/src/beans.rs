//! Bean-system declaration nodes (`beans` documents).

use serde::{Deserialize, Serialize};

/// Root of a bean-system document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeansDecl {
    pub beans: Vec<BeanNode>,
    pub events: Vec<BeanNode>,
    pub enums: Vec<BeanEnumNode>,
}

/// A `bean` or `event` declaration; both share the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeanNode {
    pub class: Option<String>,
    pub extends: Option<String>,
    /// `bean` or `event`; beans typed `event` are treated as events.
    #[serde(rename = "type")]
    pub bean_type: Option<String>,
    pub template: Option<String>,
    #[serde(rename = "abstract")]
    pub is_abstract: Option<bool>,
    pub deprecated: Option<bool>,
    pub deprecated_since: Option<String>,
    pub super_equals: Option<bool>,
    pub description: Option<String>,
    pub imports: Vec<ImportNode>,
    pub annotations: Vec<AnnotationNode>,
    pub properties: Vec<PropertyNode>,
    pub hints: Vec<HintNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportNode {
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    #[serde(rename = "static")]
    pub is_static: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationNode {
    pub value: Option<String>,
    /// `all`, `getter` or `setter`.
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyNode {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub equals: Option<bool>,
    pub deprecated: Option<bool>,
    pub deprecated_since: Option<String>,
    pub description: Option<String>,
    pub annotations: Vec<AnnotationNode>,
    pub hints: Vec<HintNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintNode {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeanEnumNode {
    pub class: Option<String>,
    pub template: Option<String>,
    pub deprecated: Option<bool>,
    pub deprecated_since: Option<String>,
    pub description: Option<String>,
    pub values: Vec<BeanEnumValueNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeanEnumValueNode {
    pub value: Option<String>,
}

impl BeanNode {
    #[must_use]
    pub fn new(class: &str) -> Self {
        Self {
            class: Some(class.to_string()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: &str, type_name: &str) -> Self {
        self.properties.push(PropertyNode {
            name: Some(name.to_string()),
            type_name: Some(type_name.to_string()),
            ..Default::default()
        });
        self
    }
}
