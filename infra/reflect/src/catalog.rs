use crate::decl::TypeDecl;
use crate::error::ReflectError;
use fxhash::{FxHashMap, FxHashSet};
use plugboard_domain::constants::{ATTRIBUTE_MARKER, DRIVER_ATTRIBUTE_CONTRACT, DRIVER_CONTRACT};
use plugboard_domain::{Annotation, TypeInfo, TypeIntrospector, TypeKind, TypeName};
use std::collections::VecDeque;
use tracing::trace;

/// Declared types, keyed by name.
///
/// [`TypeCatalog::new`] pre-declares the driver markers ([`DRIVER_CONTRACT`],
/// [`DRIVER_ATTRIBUTE_CONTRACT`]) and the [`ATTRIBUTE_MARKER`] meta type.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types: FxHashMap<TypeName, TypeDecl>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCatalog {
    #[must_use]
    pub fn new() -> Self {
        let mut catalog = Self::empty();
        for decl in [
            TypeDecl::attribute(ATTRIBUTE_MARKER),
            TypeDecl::interface(DRIVER_CONTRACT),
            TypeDecl::interface(DRIVER_ATTRIBUTE_CONTRACT),
        ] {
            catalog.types.insert(decl.name.clone(), decl);
        }
        catalog
    }

    /// A catalog without the built-in markers.
    #[must_use]
    pub fn empty() -> Self {
        Self { types: FxHashMap::default() }
    }

    /// Adds a declaration.
    ///
    /// Parents do not need to be declared first; unknown parents simply never match.
    ///
    /// # Errors
    /// Returns [`ReflectError::AlreadyDeclared`] for duplicate names and
    /// [`ReflectError::SelfInheritance`] when the type lists itself as a parent.
    pub fn declare(&mut self, decl: TypeDecl) -> Result<&mut Self, ReflectError> {
        if self.types.contains_key(decl.name.as_str()) {
            return Err(ReflectError::AlreadyDeclared { type_name: decl.name });
        }
        if decl.extends.contains(&decl.name) {
            return Err(ReflectError::SelfInheritance { type_name: decl.name });
        }

        trace!(type_name = %decl.name, kind = ?decl.kind, "Declared type");
        self.types.insert(decl.name.clone(), decl);
        Ok(self)
    }

    /// Chaining variant of [`TypeCatalog::declare`].
    ///
    /// # Errors
    /// Same as [`TypeCatalog::declare`].
    pub fn with(mut self, decl: TypeDecl) -> Result<Self, ReflectError> {
        self.declare(decl)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Every declared ancestor of `name`, breadth first, each listed once.
    ///
    /// Undeclared parents are reported but not walked further. Cycles are tolerated.
    #[must_use]
    pub fn ancestors(&self, name: &str) -> Vec<TypeName> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        let mut queue: VecDeque<&TypeName> =
            self.types.get(name).map(|decl| decl.extends.iter().collect()).unwrap_or_default();

        while let Some(parent) = queue.pop_front() {
            if parent == name || !seen.insert(parent.clone()) {
                continue;
            }
            order.push(parent.clone());
            if let Some(decl) = self.types.get(parent.as_str()) {
                queue.extend(decl.extends.iter());
            }
        }
        order
    }
}

impl TypeIntrospector for TypeCatalog {
    fn declared_type(&self, name: &str) -> Option<TypeInfo> {
        self.types.get(name).map(|decl| TypeInfo::new(decl.name.clone(), decl.kind))
    }

    fn annotations_of(&self, ty: &TypeInfo, annotation: &str) -> Vec<Annotation> {
        let mut found: Vec<Annotation> = self
            .types
            .get(ty.name.as_str())
            .map(|decl| decl.annotations.iter().filter(|a| a.name == annotation).cloned().collect())
            .unwrap_or_default();

        if annotation == ATTRIBUTE_MARKER && ty.kind == TypeKind::Attribute {
            found.push(Annotation::new(ATTRIBUTE_MARKER));
        }
        found
    }

    fn implements_interface(&self, ty: &TypeInfo, target: &str) -> bool {
        ty.name == target || self.ancestors(&ty.name).iter().any(|parent| parent == target)
    }

    fn is_interface_or_abstract(&self, ty: &TypeInfo) -> bool {
        matches!(ty.kind, TypeKind::Interface | TypeKind::Abstract)
    }
}
