//! # Container
//!
//! A small dependency-injection [`Container`] implementing
//! [`InstanceBuilder`](plugboard_domain::InstanceBuilder).
//!
//! Each instantiable type registers a [`Recipe`]: the parameters its constructor needs and a
//! factory turning the resolved [`Args`] into the value. Parameters are resolved in order:
//!
//! 1. an explicit value passed to `instantiate` under the same name;
//! 2. otherwise by kind: services are instantiated recursively by type, values fall back to
//!    their default, unions are rejected.
//!
//! Types are checked against the injected introspector first, so undeclared, abstract and
//! interface types fail before any factory runs. Interfaces can be bound to a concrete type
//! with [`Container::bind`].
//!
//! ## Example
//!
//! ```rust
//! use plugboard_container::{Container, Recipe};
//! use plugboard_domain::{InstanceBuilder, Parameters};
//! use plugboard_reflect::{TypeCatalog, TypeDecl};
//! use std::sync::Arc;
//!
//! struct FileStore {
//!     root: String,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = TypeCatalog::new().with(TypeDecl::class("FileStore"))?;
//! let container = Container::new(Arc::new(catalog)).with(
//!     Recipe::new("FileStore", |args| Ok(FileStore { root: args.take("root")? }))
//!         .value_or("root", String::from("/var/lib/drivers")),
//! );
//!
//! let store = container.instantiate("FileStore", Parameters::new())?;
//! let store = store.downcast::<FileStore>().map_err(|_| "not a FileStore")?;
//! assert_eq!(store.root, "/var/lib/drivers");
//! # Ok(())
//! # }
//! ```

mod args;
mod container;
mod recipe;

pub use args::Args;
pub use container::Container;
pub use recipe::{Parameter, Recipe};
