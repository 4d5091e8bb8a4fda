use crate::types::TypeName;
use serde::Deserialize;

/// Declarative registry setup, usually loaded from a `drivers.toml` file.
///
/// `attribute`/`contract` feed the one-shot configuration, `enabled` lists the driver
/// types to enable right after it, in order.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    pub attribute: Option<TypeName>,
    pub contract: Option<TypeName>,
    pub enabled: Vec<TypeName>,
}

impl DriverSettings {
    /// Whether at least one identification strategy is described.
    #[must_use]
    pub const fn has_identification(&self) -> bool {
        self.attribute.is_some() || self.contract.is_some()
    }
}
