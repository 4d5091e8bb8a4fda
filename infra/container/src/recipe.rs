use crate::args::Args;
use plugboard_domain::{BoxError, Instance, TypeName};
use std::any::Any;
use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::sync::Arc;

pub(crate) type Factory = Arc<dyn Fn(&mut Args) -> Result<Instance, BoxError> + Send + Sync>;
type DefaultValue = Arc<dyn Fn() -> Instance + Send + Sync>;

/// A constructor parameter, resolved in declaration order.
#[derive(Clone)]
pub enum Parameter {
    /// Built through the container by type.
    Service { name: Cow<'static, str>, type_name: TypeName },
    /// Supplied explicitly, or from its default when one exists.
    Value { name: Cow<'static, str>, default: Option<DefaultValue> },
    /// Any of several types; never resolved automatically.
    Union { name: Cow<'static, str>, candidates: Vec<TypeName> },
}

impl Parameter {
    #[must_use]
    pub fn name(&self) -> &Cow<'static, str> {
        match self {
            Self::Service { name, .. } | Self::Value { name, .. } | Self::Union { name, .. } => name,
        }
    }
}

impl Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service { name, type_name } => {
                f.debug_struct("Service").field("name", name).field("type_name", type_name).finish()
            },
            Self::Value { name, default } => f
                .debug_struct("Value")
                .field("name", name)
                .field("has_default", &default.is_some())
                .finish(),
            Self::Union { name, candidates } => {
                f.debug_struct("Union").field("name", name).field("candidates", candidates).finish()
            },
        }
    }
}

/// How to construct one type: its parameters and the factory consuming them.
#[derive(Clone)]
pub struct Recipe {
    pub(crate) type_name: TypeName,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) factory: Factory,
}

impl Recipe {
    /// Creates a recipe whose factory produces a `T`.
    ///
    /// Errors returned by the factory are reported as instantiation failures, except
    /// [`ConstructionError`](plugboard_domain::ConstructionError)s (for instance from
    /// [`Args::take`]), which pass through unchanged.
    #[must_use = "The recipe must be registered in a container"]
    pub fn new<T, F>(type_name: impl Into<TypeName>, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut Args) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            parameters: Vec::new(),
            factory: Arc::new(move |args: &mut Args| factory(args).map(|value| Box::new(value) as Instance)),
        }
    }

    /// Declares a dependency built by type.
    #[must_use = "The recipe must be registered in a container"]
    pub fn service(mut self, name: impl Into<Cow<'static, str>>, type_name: impl Into<TypeName>) -> Self {
        self.parameters.push(Parameter::Service { name: name.into(), type_name: type_name.into() });
        self
    }

    /// Declares a value that must be passed explicitly.
    #[must_use = "The recipe must be registered in a container"]
    pub fn value(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.parameters.push(Parameter::Value { name: name.into(), default: None });
        self
    }

    /// Declares a value with a default used when none is passed.
    #[must_use = "The recipe must be registered in a container"]
    pub fn value_or<V>(mut self, name: impl Into<Cow<'static, str>>, default: V) -> Self
    where
        V: Any + Clone + Send + Sync,
    {
        let default: DefaultValue = Arc::new(move || Box::new(default.clone()) as Instance);
        self.parameters.push(Parameter::Value { name: name.into(), default: Some(default) });
        self
    }

    /// Declares a parameter accepting any of `candidates`; it only resolves from explicit values.
    #[must_use = "The recipe must be registered in a container"]
    pub fn union<I, N>(mut self, name: impl Into<Cow<'static, str>>, candidates: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<TypeName>,
    {
        let candidates = candidates.into_iter().map(Into::into).collect();
        self.parameters.push(Parameter::Union { name: name.into(), candidates });
        self
    }

    #[must_use]
    pub const fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

impl Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe")
            .field("type_name", &self.type_name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
