use crate::args::Args;
use crate::recipe::{Parameter, Recipe};
use fxhash::FxHashMap;
use plugboard_domain::{
    ConstructionError, Instance, InstanceBuilder, Parameters, TypeIntrospector, TypeName,
};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, trace};

/// Builds instances from registered [`Recipe`]s, resolving dependencies by type.
///
/// Every call produces fresh instances; the container caches nothing.
#[derive(Debug, Clone)]
pub struct Container {
    introspector: Arc<dyn TypeIntrospector>,
    recipes: FxHashMap<TypeName, Arc<Recipe>>,
    bindings: FxHashMap<TypeName, TypeName>,
}

impl Container {
    #[must_use]
    pub fn new(introspector: Arc<dyn TypeIntrospector>) -> Self {
        Self { introspector, recipes: FxHashMap::default(), bindings: FxHashMap::default() }
    }

    /// Registers (or replaces) the recipe for its type.
    pub fn register(&mut self, recipe: Recipe) -> &mut Self {
        debug!(type_name = %recipe.type_name, params = recipe.parameters.len(), "Registered recipe");
        self.recipes.insert(recipe.type_name.clone(), Arc::new(recipe));
        self
    }

    /// Chaining variant of [`Container::register`].
    #[must_use]
    pub fn with(mut self, recipe: Recipe) -> Self {
        self.register(recipe);
        self
    }

    /// Resolves `abstract_type` (usually an interface) through `concrete`.
    pub fn bind(&mut self, abstract_type: impl Into<TypeName>, concrete: impl Into<TypeName>) -> &mut Self {
        let (abstract_type, concrete) = (abstract_type.into(), concrete.into());
        debug!(from = %abstract_type, to = %concrete, "Bound type");
        self.bindings.insert(abstract_type, concrete);
        self
    }

    #[must_use]
    pub fn has_recipe(&self, type_name: &str) -> bool {
        self.recipes.contains_key(type_name)
    }

    fn resolve(
        &self,
        type_name: &str,
        mut explicit: Parameters,
        stack: &mut Vec<TypeName>,
    ) -> Result<Instance, ConstructionError> {
        let info = self.introspector.declared_type(type_name).ok_or_else(|| {
            ConstructionError::TypeUndeclared { type_name: TypeName::from(type_name.to_owned()) }
        })?;

        if stack.contains(&info.name) {
            let chain = stack
                .iter()
                .map(TypeName::as_str)
                .chain([info.name.as_str()])
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ConstructionError::CircularDependency { chain });
        }

        if let Some(concrete) = self.bindings.get(type_name) {
            stack.push(info.name);
            let result = self.resolve(concrete, explicit, stack);
            stack.pop();
            return result;
        }

        if self.introspector.is_interface_or_abstract(&info) {
            return Err(ConstructionError::NotInstantiable {
                type_name: info.name,
                reason: Cow::Borrowed("interfaces and abstract bases cannot be instantiated"),
            });
        }

        let recipe = self.recipes.get(type_name).cloned().ok_or_else(|| {
            ConstructionError::NotInstantiable {
                type_name: info.name.clone(),
                reason: Cow::Borrowed("no recipe registered"),
            }
        })?;

        stack.push(info.name);
        let result = self.build(&recipe, &mut explicit, stack);
        stack.pop();
        result
    }

    fn build(
        &self,
        recipe: &Recipe,
        explicit: &mut Parameters,
        stack: &mut Vec<TypeName>,
    ) -> Result<Instance, ConstructionError> {
        let mut args = Args::new(recipe.type_name.clone());

        for parameter in &recipe.parameters {
            let name = parameter.name();
            let value = if let Some(value) = explicit.take(name) {
                value
            } else {
                match parameter {
                    Parameter::Service { type_name, .. } => {
                        self.resolve(type_name, Parameters::new(), stack)?
                    },
                    Parameter::Value { default: Some(default), .. } => default(),
                    Parameter::Value { default: None, .. } => {
                        return Err(ConstructionError::UnresolvedParameter {
                            type_name: recipe.type_name.clone(),
                            parameter: name.clone(),
                        });
                    },
                    Parameter::Union { candidates, .. } => {
                        return Err(ConstructionError::UnsupportedParameter {
                            type_name: recipe.type_name.clone(),
                            parameter: name.clone(),
                            reason: Cow::Owned(format!(
                                "union of {} needs an explicit value",
                                candidates.join(" | ")
                            )),
                        });
                    },
                }
            };
            args.insert(name.clone(), value);
        }

        trace!(type_name = %recipe.type_name, depth = stack.len(), "Invoking factory");
        (recipe.factory)(&mut args).map_err(|err| match err.downcast::<ConstructionError>() {
            Ok(inner) => *inner,
            Err(source) => ConstructionError::InstantiationFailed {
                type_name: recipe.type_name.clone(),
                source,
                context: None,
            },
        })
    }
}

impl InstanceBuilder for Container {
    fn instantiate(&self, type_name: &str, parameters: Parameters) -> Result<Instance, ConstructionError> {
        self.resolve(type_name, parameters, &mut Vec::new())
    }
}
