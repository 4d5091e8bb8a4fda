//! # Domain Models
//!
//! Pure driver types shared by the registry and its collaborators, with minimal dependencies.
//! Keep it lean: no I/O and no registry logic, just data, error types and the narrow
//! collaborator contracts ([`TypeIntrospector`], [`InstanceBuilder`]).

pub mod config;
pub mod constants;
pub mod construction;
pub mod introspection;
pub mod types;

pub use construction::{
    BoxError, ConstructionError, ConstructionErrorExt, Instance, InstanceBuilder, Parameters,
};
pub use introspection::{Annotation, TypeInfo, TypeIntrospector, TypeKind};
pub use types::TypeName;
