use crate::error::DriverError;
use plugboard_domain::constants::{ATTRIBUTE_MARKER, DRIVER_ATTRIBUTE_CONTRACT, DRIVER_CONTRACT};
use plugboard_domain::{TypeInfo, TypeIntrospector, TypeKind, TypeName};
use tracing::trace;

/// How a registry recognises driver types: by attribute, by contract, or by either.
///
/// A strategy only exists once both identifiers have been validated, so holding one means the
/// registry is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentificationStrategy {
    attribute: Option<TypeName>,
    contract: Option<TypeName>,
}

impl IdentificationStrategy {
    /// Validates the identifiers and builds the strategy.
    ///
    /// The attribute is checked first, then the contract; nothing is retained on failure.
    ///
    /// # Errors
    /// [`DriverError::IdentifierRequired`] when both are absent, otherwise the first
    /// attribute or contract validation failure.
    pub fn validate(
        introspector: &dyn TypeIntrospector,
        attribute: Option<&str>,
        contract: Option<&str>,
    ) -> Result<Self, DriverError> {
        if attribute.is_none() && contract.is_none() {
            return Err(DriverError::IdentifierRequired);
        }

        let attribute = attribute.map(|name| validate_attribute(introspector, name)).transpose()?;
        let contract = contract.map(|name| validate_contract(introspector, name)).transpose()?;

        Ok(Self { attribute, contract })
    }

    #[must_use]
    pub const fn attribute(&self) -> Option<&TypeName> {
        self.attribute.as_ref()
    }

    #[must_use]
    pub const fn contract(&self) -> Option<&TypeName> {
        self.contract.as_ref()
    }

    /// Whether the declared type `ty` is a driver: it carries the attribute, or it implements
    /// the contract.
    #[must_use]
    pub fn matches(&self, introspector: &dyn TypeIntrospector, ty: &TypeInfo) -> bool {
        let by_attribute = self
            .attribute
            .as_ref()
            .is_some_and(|attribute| !introspector.annotations_of(ty, attribute).is_empty());

        by_attribute
            || self
                .contract
                .as_ref()
                .is_some_and(|contract| introspector.implements_interface(ty, contract))
    }

    /// Resolves `type_name` and checks it with [`IdentificationStrategy::matches`].
    ///
    /// Only concrete or abstract classes qualify; unknown names and interfaces are never drivers.
    #[must_use]
    pub fn supports(&self, introspector: &dyn TypeIntrospector, type_name: &str) -> bool {
        let Some(ty) = declared_class(introspector, type_name) else {
            trace!(type_name, "Type is not a declared class");
            return false;
        };
        self.matches(introspector, &ty)
    }
}

fn declared_class(introspector: &dyn TypeIntrospector, name: &str) -> Option<TypeInfo> {
    introspector.declared_type(name).filter(|ty| ty.kind != TypeKind::Interface)
}

fn validate_attribute(introspector: &dyn TypeIntrospector, name: &str) -> Result<TypeName, DriverError> {
    let owned = || TypeName::from(name.to_owned());

    let ty = declared_class(introspector, name)
        .ok_or_else(|| DriverError::AttributeTypeUndeclared { type_name: owned() })?;

    if introspector.annotations_of(&ty, ATTRIBUTE_MARKER).is_empty() {
        return Err(DriverError::NotAnAttributeType { type_name: owned() });
    }
    if !introspector.implements_interface(&ty, DRIVER_ATTRIBUTE_CONTRACT) {
        return Err(DriverError::AttributeContractUnimplemented { type_name: owned() });
    }
    Ok(ty.name)
}

fn validate_contract(introspector: &dyn TypeIntrospector, name: &str) -> Result<TypeName, DriverError> {
    let owned = || TypeName::from(name.to_owned());

    let ty = introspector
        .declared_type(name)
        .ok_or_else(|| DriverError::ContractTypeUndeclared { type_name: owned() })?;

    if !introspector.is_interface_or_abstract(&ty) {
        return Err(DriverError::ContractNotAbstract { type_name: owned() });
    }
    if !introspector.implements_interface(&ty, DRIVER_CONTRACT) {
        return Err(DriverError::ContractBaseUnimplemented { type_name: owned() });
    }
    Ok(ty.name)
}
