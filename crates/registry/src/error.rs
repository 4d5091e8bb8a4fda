//! # Driver Errors
//!
//! [`DriverError`] covers every way a registry call can fail. Validation failures are raised
//! before any state changes; construction failures are carried through untouched.

use plugboard_domain::constants::{DRIVER_ATTRIBUTE_CONTRACT, DRIVER_CONTRACT};
use plugboard_domain::{ConstructionError, TypeName};
use std::borrow::Cow;

/// Failures reported by [`DriverRegistry`](crate::DriverRegistry).
#[plugboard_derive::plugboard_error]
pub enum DriverError {
    #[error("This driver registry has already been configured")]
    AlreadyConfigured,

    #[error("An attribute, a contract, or both must be provided to the driver registry")]
    IdentifierRequired,

    #[error("The attribute type does not seem to exist: {type_name}")]
    AttributeTypeUndeclared { type_name: TypeName },

    #[error("The attribute type exists but is not an attribute type: {type_name}")]
    NotAnAttributeType { type_name: TypeName },

    #[error("The attribute type exists but does not implement {}: {type_name}", DRIVER_ATTRIBUTE_CONTRACT)]
    AttributeContractUnimplemented { type_name: TypeName },

    #[error("The contract interface or abstract type does not seem to exist: {type_name}")]
    ContractTypeUndeclared { type_name: TypeName },

    #[error("The contract exists but is neither an interface nor abstract: {type_name}")]
    ContractNotAbstract { type_name: TypeName },

    #[error("The contract exists but does not extend {}: {type_name}", DRIVER_CONTRACT)]
    ContractBaseUnimplemented { type_name: TypeName },

    #[error("This driver registry has not been configured")]
    NotConfigured,

    #[error("The type is not supported by this driver registry: {type_name}")]
    NotSupported { type_name: TypeName },

    #[error("The driver is already enabled: {type_name}")]
    AlreadyEnabled { type_name: TypeName },

    #[error("The driver is not enabled: {type_name}")]
    NotEnabled { type_name: TypeName },

    /// A resolved driver was requested as a type it is not.
    #[error("The driver {type_name} is not a {expected}")]
    TypeMismatch { type_name: TypeName, expected: &'static str },

    /// The instance builder failed; the source is reported as is.
    #[error("{source}{}", format_context(.context))]
    Construction { source: ConstructionError, context: Option<Cow<'static, str>> },
}

impl DriverError {
    /// Stable numeric code, for hosts mapping failures onto external error codes.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Construction { .. } => 2200,
            Self::NotEnabled { .. } => 2201,
            Self::IdentifierRequired => 2202,
            Self::AttributeTypeUndeclared { .. } => 2203,
            Self::NotAnAttributeType { .. } => 2204,
            Self::AttributeContractUnimplemented { .. } => 2205,
            Self::ContractTypeUndeclared { .. } => 2206,
            Self::ContractNotAbstract { .. } => 2207,
            Self::ContractBaseUnimplemented { .. } => 2208,
            Self::NotSupported { .. } => 2209,
            Self::AlreadyEnabled { .. } => 2210,
            Self::AlreadyConfigured => 2211,
            Self::NotConfigured => 2212,
            Self::TypeMismatch { .. } => 2213,
        }
    }

    /// The type the failure is about, when there is one.
    #[must_use]
    pub const fn type_name(&self) -> Option<&TypeName> {
        match self {
            Self::AttributeTypeUndeclared { type_name }
            | Self::NotAnAttributeType { type_name }
            | Self::AttributeContractUnimplemented { type_name }
            | Self::ContractTypeUndeclared { type_name }
            | Self::ContractNotAbstract { type_name }
            | Self::ContractBaseUnimplemented { type_name }
            | Self::NotSupported { type_name }
            | Self::AlreadyEnabled { type_name }
            | Self::NotEnabled { type_name }
            | Self::TypeMismatch { type_name, .. } => Some(type_name),
            Self::AlreadyConfigured
            | Self::IdentifierRequired
            | Self::NotConfigured
            | Self::Construction { .. } => None,
        }
    }
}
