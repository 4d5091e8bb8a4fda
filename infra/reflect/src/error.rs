use plugboard_domain::TypeName;

/// Failures while declaring types in a [`TypeCatalog`](crate::TypeCatalog).
#[plugboard_derive::plugboard_error]
pub enum ReflectError {
    /// A type with the same name is already part of the catalog.
    #[error("Type already declared: {type_name}")]
    AlreadyDeclared { type_name: TypeName },

    /// A declaration lists itself among its parents.
    #[error("Type cannot extend itself: {type_name}")]
    SelfInheritance { type_name: TypeName },
}
