//! # Plugboard Registry
//!
//! A [`DriverRegistry`] decides which types are drivers, remembers which of them the host has
//! enabled, and builds each enabled driver once, on first request.
//!
//! Drivers are recognised by an attribute type (the driver carries it as an annotation), by a
//! contract (the driver implements it), or by either of the two. Both are checked through a
//! [`TypeIntrospector`](plugboard_domain::TypeIntrospector); construction is delegated to an
//! [`InstanceBuilder`](plugboard_domain::InstanceBuilder).
//!
//! ```
//! use plugboard_container::{Container, Recipe};
//! use plugboard_domain::constants::DRIVER_CONTRACT;
//! use plugboard_reflect::{TypeCatalog, TypeDecl};
//! use plugboard_registry::DriverRegistry;
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct FileStore;
//!
//! let catalog = Arc::new(
//!     TypeCatalog::new()
//!         .with(TypeDecl::interface("StorageContract").extends(DRIVER_CONTRACT))?
//!         .with(TypeDecl::class("FileStore").extends("StorageContract"))?,
//! );
//! let container = Container::new(catalog.clone()).with(Recipe::new("FileStore", |_| Ok(FileStore)));
//!
//! let mut registry = DriverRegistry::new(catalog, Arc::new(container));
//! registry.configure(None, Some("StorageContract"))?;
//! registry.enable("FileStore")?;
//! assert!(registry.get_as::<FileStore>("FileStore").is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod identification;
mod registry;

pub use error::{DriverError, DriverErrorExt};
pub use identification::IdentificationStrategy;
pub use registry::DriverRegistry;
