//! Object construction contract.
//!
//! An [`InstanceBuilder`] turns a type name plus explicit [`Parameters`] into a live,
//! fully-wired [`Instance`]. How it discovers and resolves constructor dependencies is its
//! own business; callers only see the [`ConstructionError`] kinds below.

use crate::types::TypeName;
use fxhash::FxHashMap;
use std::any::Any;
use std::borrow::Cow;
use std::fmt::Debug;

/// A type-erased, owned driver (or dependency) instance.
pub type Instance = Box<dyn Any + Send + Sync>;

/// Boxed error raised by user constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures an [`InstanceBuilder`] may surface while materializing a type.
#[plugboard_derive::plugboard_error]
pub enum ConstructionError {
    /// Nothing with this name is declared.
    #[error("Type is not declared: {type_name}")]
    TypeUndeclared { type_name: TypeName },

    /// The type is declared but cannot be built (interface, abstract base, no constructor).
    #[error("Type is not instantiable: {type_name} ({reason})")]
    NotInstantiable { type_name: TypeName, reason: Cow<'static, str> },

    /// Resolving the constructor dependencies led back to a type already being built.
    #[error("Circular reference while instantiating: {chain}")]
    CircularDependency { chain: String },

    /// No explicit value, default or resolvable type exists for a parameter.
    #[error("Unable to resolve parameter '{parameter}' of {type_name}")]
    UnresolvedParameter { type_name: TypeName, parameter: Cow<'static, str> },

    /// The parameter shape cannot be resolved automatically, or the supplied value has the wrong type.
    #[error("Unsupported parameter '{parameter}' of {type_name}: {reason}")]
    UnsupportedParameter {
        type_name: TypeName,
        parameter: Cow<'static, str>,
        reason: Cow<'static, str>,
    },

    /// The constructor itself failed.
    #[error("Instantiation of {type_name} failed{}: {source}", format_context(.context))]
    InstantiationFailed {
        type_name: TypeName,
        source: BoxError,
        context: Option<Cow<'static, str>>,
    },
}

/// Explicit constructor parameters, keyed by parameter name.
#[derive(Debug, Default)]
pub struct Parameters {
    values: FxHashMap<Cow<'static, str>, Instance>,
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a typed value for the parameter `name`.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<Cow<'static, str>>, value: T) -> Self {
        self.values.insert(name.into(), Box::new(value));
        self
    }

    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, value: Instance) {
        self.values.insert(name.into(), value);
    }

    /// Removes and returns the value for `name`.
    pub fn take(&mut self, name: &str) -> Option<Instance> {
        self.values.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builds fully-wired instances by type name.
pub trait InstanceBuilder: Debug + Send + Sync {
    /// Instantiates `type_name`, using `parameters` before any automatic resolution.
    ///
    /// # Errors
    /// Returns a [`ConstructionError`] describing why the instance could not be produced.
    fn instantiate(&self, type_name: &str, parameters: Parameters) -> Result<Instance, ConstructionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_hand_out_values_once() {
        let mut params = Parameters::new().with("root", String::from("/var/lib/drivers"));
        assert!(params.contains("root"));
        assert_eq!(params.len(), 1);

        let root = params.take("root").and_then(|v| v.downcast::<String>().ok());
        assert_eq!(root.as_deref().map(String::as_str), Some("/var/lib/drivers"));
        assert!(params.take("root").is_none());
        assert!(params.is_empty());
    }

    #[test]
    fn instantiation_failure_keeps_context_and_source() {
        let failed: Result<(), ConstructionError> = Err(ConstructionError::InstantiationFailed {
            type_name: "FileStore".into(),
            source: "disk unavailable".into(),
            context: None,
        });

        let err = failed.context("Opening root").expect_err("must stay an error");
        assert_eq!(err.to_string(), "Instantiation of FileStore failed (Opening root): disk unavailable");
        assert!(std::error::Error::source(&err).is_some());
    }
}
