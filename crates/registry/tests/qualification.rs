use plugboard_container::Container;
use plugboard_domain::Annotation;
use plugboard_domain::constants::{DRIVER_ATTRIBUTE_CONTRACT, DRIVER_CONTRACT};
use plugboard_reflect::{TypeCatalog, TypeDecl};
use plugboard_registry::DriverRegistry;
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    annotated: bool,
    implements: bool,
}

fn candidate() -> impl Strategy<Value = Candidate> {
    (any::<bool>(), any::<bool>()).prop_map(|(annotated, implements)| Candidate { annotated, implements })
}

fn registry(candidate: Candidate, attribute: bool, contract: bool) -> DriverRegistry {
    let mut driver = TypeDecl::class("Candidate");
    if candidate.annotated {
        driver = driver.annotated(Annotation::new("Driver"));
    }
    if candidate.implements {
        driver = driver.extends("Contract");
    }

    let catalog = TypeCatalog::new()
        .with(TypeDecl::attribute("Driver").extends(DRIVER_ATTRIBUTE_CONTRACT))
        .and_then(|c| c.with(TypeDecl::interface("Contract").extends(DRIVER_CONTRACT)))
        .and_then(|c| c.with(driver))
        .expect("catalog should build");
    let catalog = Arc::new(catalog);

    let mut registry = DriverRegistry::new(catalog.clone(), Arc::new(Container::new(catalog)));
    registry
        .configure(attribute.then_some("Driver"), contract.then_some("Contract"))
        .expect("identifiers are valid");
    registry
}

proptest! {
    #[test]
    fn supports_is_the_or_of_configured_identifiers(
        candidate in candidate(),
        (attribute, contract) in prop_oneof![Just((true, false)), Just((false, true)), Just((true, true))],
    ) {
        let registry = registry(candidate, attribute, contract);
        let expected = (attribute && candidate.annotated) || (contract && candidate.implements);

        prop_assert_eq!(registry.supports("Candidate").ok(), Some(expected));
        prop_assert_eq!(registry.supports("Unknown").ok(), Some(false));
    }

    #[test]
    fn enable_succeeds_exactly_when_supported(candidate in candidate()) {
        let mut registry = registry(candidate, true, true);
        let supported = registry.supports("Candidate").unwrap_or(false);

        prop_assert_eq!(registry.enable("Candidate").is_ok(), supported);
        prop_assert_eq!(registry.is_enabled("Candidate").ok(), Some(supported));
        prop_assert!(registry.enable("Candidate").is_err());
    }
}
