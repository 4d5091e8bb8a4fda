use fxhash::FxHashMap;
use plugboard_domain::{ConstructionError, Instance, TypeName};
use std::any::Any;
use std::borrow::Cow;

/// Resolved constructor arguments handed to a recipe factory.
#[derive(Debug)]
pub struct Args {
    type_name: TypeName,
    values: FxHashMap<Cow<'static, str>, Instance>,
}

impl Args {
    pub(crate) fn new(type_name: TypeName) -> Self {
        Self { type_name, values: FxHashMap::default() }
    }

    pub(crate) fn insert(&mut self, name: Cow<'static, str>, value: Instance) {
        self.values.insert(name, value);
    }

    /// The type being constructed.
    #[must_use]
    pub const fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Moves the argument `name` out as a `T`.
    ///
    /// # Errors
    /// [`ConstructionError::UnresolvedParameter`] when the argument is absent (or already taken),
    /// [`ConstructionError::UnsupportedParameter`] when it holds something other than a `T`.
    pub fn take<T: Any>(&mut self, name: &str) -> Result<T, ConstructionError> {
        let value = self.values.remove(name).ok_or_else(|| ConstructionError::UnresolvedParameter {
            type_name: self.type_name.clone(),
            parameter: Cow::Owned(name.to_owned()),
        })?;

        value.downcast::<T>().map(|value| *value).map_err(|_| {
            ConstructionError::UnsupportedParameter {
                type_name: self.type_name.clone(),
                parameter: Cow::Owned(name.to_owned()),
                reason: Cow::Owned(format!("expected a value of type {}", std::any::type_name::<T>())),
            }
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
