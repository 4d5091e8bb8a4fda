//! # Reflect
//!
//! An in-memory [`TypeCatalog`] implementing [`TypeIntrospector`](plugboard_domain::TypeIntrospector).
//!
//! Rust has no runtime class metadata, so hosts declare the shape of their driver types
//! once: what kind of type it is, which contracts or bases it extends, and which annotations
//! sit on it. The registry then queries that metadata through the narrow introspection trait.
//!
//! ## Example
//!
//! ```rust
//! use plugboard_domain::TypeIntrospector;
//! use plugboard_domain::constants::DRIVER_CONTRACT;
//! use plugboard_reflect::{TypeCatalog, TypeDecl};
//!
//! # fn main() -> Result<(), plugboard_reflect::ReflectError> {
//! let catalog = TypeCatalog::new()
//!     .with(TypeDecl::interface("StorageDriverContract").extends(DRIVER_CONTRACT))?
//!     .with(TypeDecl::class("FileStore").extends("StorageDriverContract"))?;
//!
//! let file_store = catalog.declared_type("FileStore").expect("declared");
//! assert!(catalog.implements_interface(&file_store, DRIVER_CONTRACT));
//! # Ok(())
//! # }
//! ```

mod catalog;
mod decl;
mod error;

pub use catalog::TypeCatalog;
pub use decl::TypeDecl;
pub use error::{ReflectError, ReflectErrorExt};
