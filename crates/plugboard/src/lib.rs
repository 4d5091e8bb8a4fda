//! Facade crate for plugboard.
//! Re-exports the registry, its collaborators and the shared primitives, and provides
//! [`DriverManagerProvider`] to hand registries to host code.
//! Keep this crate thin: it should compose other crates, not implement registry logic.
//!
//! ## Usage
//! - Describe the host's types in a [`TypeCatalog`](reflect::TypeCatalog) and their
//!   constructors in a [`Container`](container::Container).
//! - Build a [`DriverManagerProvider`] from both and ask it for registries.
//! - `use plugboard::prelude::*;` brings the common names into scope.

pub mod prelude;
mod provider;

pub use plugboard_container as container;
pub use plugboard_domain as domain;
pub use plugboard_kernel as kernel;
pub use plugboard_reflect as reflect;
pub use plugboard_registry as registry;

#[cfg(feature = "shared")]
pub use provider::SharedRegistry;
pub use provider::{DRIVER_REGISTRY, DriverManagerProvider};

/// Build-time enabled features (by Cargo feature).
pub const FEATURES: &[&str] = &[
    #[cfg(feature = "shared")]
    "shared",
];
