pub use crate::DriverManagerProvider;
#[cfg(feature = "shared")]
pub use crate::SharedRegistry;
pub use plugboard_container::{Args, Container, Recipe};
pub use plugboard_domain::config::DriverSettings;
pub use plugboard_domain::constants::{ATTRIBUTE_MARKER, DRIVER_ATTRIBUTE_CONTRACT, DRIVER_CONTRACT};
pub use plugboard_domain::{
    Annotation, ConstructionError, Instance, InstanceBuilder, Parameters, TypeInfo, TypeIntrospector,
    TypeKind, TypeName,
};
pub use plugboard_reflect::{TypeCatalog, TypeDecl};
pub use plugboard_registry::{DriverError, DriverRegistry, IdentificationStrategy};
