use metamodel_types::{DocumentId, DocumentStamp, Family, ModuleName};
use serde::{Deserialize, Serialize};

use crate::beans::BeansDecl;
use crate::error::{DeclError, DeclResult};
use crate::items::ItemsDecl;

/// One parsed declaration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclarationDocument {
    pub id: DocumentId,
    pub module: ModuleName,
    /// Customer-authored override document (as opposed to out-of-the-box).
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub stamp: DocumentStamp,
    pub root: DeclarationRoot,
}

/// Root element of a document, tagged by family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum DeclarationRoot {
    TypeSystem(ItemsDecl),
    BeanSystem(BeansDecl),
}

impl DeclarationRoot {
    #[must_use]
    pub fn family(&self) -> Family {
        match self {
            DeclarationRoot::TypeSystem(_) => Family::TypeSystem,
            DeclarationRoot::BeanSystem(_) => Family::BeanSystem,
        }
    }
}

impl DeclarationDocument {
    /// Creates a type-system document.
    pub fn type_system(id: DocumentId, module: ModuleName, custom: bool, items: ItemsDecl) -> Self {
        Self {
            id,
            module,
            custom,
            stamp: DocumentStamp::default(),
            root: DeclarationRoot::TypeSystem(items),
        }
    }

    /// Creates a bean-system document.
    pub fn bean_system(id: DocumentId, module: ModuleName, custom: bool, beans: BeansDecl) -> Self {
        Self {
            id,
            module,
            custom,
            stamp: DocumentStamp::default(),
            root: DeclarationRoot::BeanSystem(beans),
        }
    }

    /// Decodes a document from its JSON form.
    pub fn from_json(json: &str) -> DeclResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the document as JSON.
    pub fn to_json(&self) -> DeclResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns the same document at a different revision.
    #[must_use]
    pub fn with_stamp(mut self, stamp: DocumentStamp) -> Self {
        self.stamp = stamp;
        self
    }

    #[must_use]
    pub fn family(&self) -> Family {
        self.root.family()
    }

    /// Returns the type-system root, or an error for bean documents.
    pub fn items(&self) -> DeclResult<&ItemsDecl> {
        match &self.root {
            DeclarationRoot::TypeSystem(items) => Ok(items),
            DeclarationRoot::BeanSystem(_) => Err(self.mismatch(Family::TypeSystem)),
        }
    }

    /// Returns the bean-system root, or an error for type documents.
    pub fn beans(&self) -> DeclResult<&BeansDecl> {
        match &self.root {
            DeclarationRoot::BeanSystem(beans) => Ok(beans),
            DeclarationRoot::TypeSystem(_) => Err(self.mismatch(Family::BeanSystem)),
        }
    }

    fn mismatch(&self, expected: Family) -> DeclError {
        DeclError::FamilyMismatch {
            document: self.id.to_string(),
            expected: format!("{expected:?}"),
        }
    }
}
