//! Type introspection contract.
//!
//! The registry never inspects types itself; it asks a [`TypeIntrospector`] the four questions
//! below. Hosts back it with whatever metadata they keep (see `plugboard-reflect` for the
//! in-memory catalog), tests back it with canned answers.

use crate::types::TypeName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// What a declared type is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// A concrete, instantiable class.
    Class,
    /// An abstract base; may be extended, never instantiated.
    Abstract,
    /// A pure contract.
    Interface,
    /// A concrete class usable as an annotation on other types.
    Attribute,
}

/// Resolved description of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    pub name: TypeName,
    pub kind: TypeKind,
}

impl TypeInfo {
    #[must_use]
    pub fn new(name: impl Into<TypeName>, kind: TypeKind) -> Self {
        Self { name: name.into(), kind }
    }
}

/// An annotation instance placed on a type, with its (stringly) arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: TypeName,
    #[serde(default)]
    pub arguments: BTreeMap<String, String>,
}

impl Annotation {
    #[must_use]
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self { name: name.into(), arguments: BTreeMap::new() }
    }

    #[must_use]
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).map(String::as_str)
    }
}

/// Narrow query interface over type metadata.
pub trait TypeIntrospector: Debug + Send + Sync {
    /// Resolves a type by name; `None` when nothing with that name is declared.
    fn declared_type(&self, name: &str) -> Option<TypeInfo>;

    /// Annotations of exactly `annotation` placed on `ty`.
    fn annotations_of(&self, ty: &TypeInfo, annotation: &str) -> Vec<Annotation>;

    /// Whether `ty` is, implements or (transitively) extends `target`.
    fn implements_interface(&self, ty: &TypeInfo, target: &str) -> bool;

    fn is_interface_or_abstract(&self, ty: &TypeInfo) -> bool;
}
