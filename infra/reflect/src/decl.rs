use plugboard_domain::{Annotation, TypeKind, TypeName};

/// Declaration of a single type: its kind, direct parents and annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: TypeName,
    pub kind: TypeKind,
    /// Direct interfaces and bases; resolved transitively by the catalog.
    pub extends: Vec<TypeName>,
    pub annotations: Vec<Annotation>,
}

impl TypeDecl {
    #[must_use = "The declaration must be added to a catalog"]
    pub fn new(name: impl Into<TypeName>, kind: TypeKind) -> Self {
        Self { name: name.into(), kind, extends: Vec::new(), annotations: Vec::new() }
    }

    #[must_use = "The declaration must be added to a catalog"]
    pub fn class(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    #[must_use = "The declaration must be added to a catalog"]
    pub fn abstract_base(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Abstract)
    }

    #[must_use = "The declaration must be added to a catalog"]
    pub fn interface(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    #[must_use = "The declaration must be added to a catalog"]
    pub fn attribute(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Attribute)
    }

    /// Adds a direct parent (interface or base).
    #[must_use = "The declaration must be added to a catalog"]
    pub fn extends(mut self, parent: impl Into<TypeName>) -> Self {
        self.extends.push(parent.into());
        self
    }

    /// Places an annotation on the type.
    #[must_use = "The declaration must be added to a catalog"]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Shorthand for an argument-less annotation.
    #[must_use = "The declaration must be added to a catalog"]
    pub fn marked(self, annotation: impl Into<TypeName>) -> Self {
        self.annotated(Annotation::new(annotation))
    }
}
