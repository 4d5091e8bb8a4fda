use crate::error::DriverError;
use crate::identification::IdentificationStrategy;
use fxhash::FxHashMap;
use plugboard_domain::config::DriverSettings;
use plugboard_domain::{Instance, InstanceBuilder, Parameters, TypeIntrospector, TypeName};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info, trace};

#[derive(Debug)]
enum RegistryState {
    Unconfigured,
    Configured(IdentificationStrategy),
}

/// An enabled driver: awaiting its first `get`, or built and cached.
#[derive(Debug)]
enum DriverSlot {
    Enabled,
    Built(Instance),
}

/// Lazily instantiates enabled drivers and hands out the same instance on every call.
///
/// The registry is configured exactly once, with an attribute, a contract, or both. From then
/// on, types recognised by that identification can be enabled and fetched. Instances are built
/// through the [`InstanceBuilder`] on first access only.
#[derive(Debug)]
pub struct DriverRegistry {
    introspector: Arc<dyn TypeIntrospector>,
    builder: Arc<dyn InstanceBuilder>,
    state: RegistryState,
    drivers: FxHashMap<TypeName, DriverSlot>,
    order: Vec<TypeName>,
}

impl DriverRegistry {
    #[must_use]
    pub fn new(introspector: Arc<dyn TypeIntrospector>, builder: Arc<dyn InstanceBuilder>) -> Self {
        Self {
            introspector,
            builder,
            state: RegistryState::Unconfigured,
            drivers: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Sets how drivers are recognised. Allowed once.
    ///
    /// # Errors
    /// [`DriverError::AlreadyConfigured`] on a second call, [`DriverError::IdentifierRequired`]
    /// when both identifiers are absent, or the first validation failure of the attribute
    /// (checked first) or the contract. The registry stays unconfigured on any error.
    pub fn configure(&mut self, attribute: Option<&str>, contract: Option<&str>) -> Result<(), DriverError> {
        if self.is_configured() {
            return Err(DriverError::AlreadyConfigured);
        }

        let strategy = IdentificationStrategy::validate(self.introspector.as_ref(), attribute, contract)?;
        info!(attribute = ?strategy.attribute(), contract = ?strategy.contract(), "Driver registry configured");
        self.state = RegistryState::Configured(strategy);
        Ok(())
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self.state, RegistryState::Configured(_))
    }

    /// The active identification, once configured.
    #[must_use]
    pub const fn identification(&self) -> Option<&IdentificationStrategy> {
        match &self.state {
            RegistryState::Configured(strategy) => Some(strategy),
            RegistryState::Unconfigured => None,
        }
    }

    fn strategy(&self) -> Result<&IdentificationStrategy, DriverError> {
        self.identification().ok_or(DriverError::NotConfigured)
    }

    /// Whether `type_name` is a driver under the configured identification.
    ///
    /// Unknown names and interfaces yield `false`.
    ///
    /// # Errors
    /// [`DriverError::NotConfigured`] before [`DriverRegistry::configure`].
    pub fn supports(&self, type_name: &str) -> Result<bool, DriverError> {
        let supported = self.strategy()?.supports(self.introspector.as_ref(), type_name);
        trace!(type_name, supported, "Checked driver support");
        Ok(supported)
    }

    /// Marks a supported type as enabled. Nothing is instantiated yet.
    ///
    /// # Errors
    /// [`DriverError::NotConfigured`], [`DriverError::NotSupported`] or
    /// [`DriverError::AlreadyEnabled`]; the enabled set is unchanged on error.
    pub fn enable(&mut self, type_name: &str) -> Result<(), DriverError> {
        if !self.supports(type_name)? {
            return Err(DriverError::NotSupported { type_name: TypeName::from(type_name.to_owned()) });
        }
        if self.drivers.contains_key(type_name) {
            return Err(DriverError::AlreadyEnabled { type_name: TypeName::from(type_name.to_owned()) });
        }

        let name = TypeName::from(type_name.to_owned());
        debug!(driver = %name, "Driver enabled");
        self.drivers.insert(name.clone(), DriverSlot::Enabled);
        self.order.push(name);
        Ok(())
    }

    /// # Errors
    /// [`DriverError::NotConfigured`] before [`DriverRegistry::configure`].
    pub fn is_enabled(&self, type_name: &str) -> Result<bool, DriverError> {
        self.strategy()?;
        Ok(self.drivers.contains_key(type_name))
    }

    /// Whether the enabled driver has been instantiated already.
    ///
    /// # Errors
    /// [`DriverError::NotConfigured`] or [`DriverError::NotEnabled`].
    pub fn is_built(&self, type_name: &str) -> Result<bool, DriverError> {
        self.strategy()?;
        match self.drivers.get(type_name) {
            Some(slot) => Ok(matches!(slot, DriverSlot::Built(_))),
            None => Err(DriverError::NotEnabled { type_name: TypeName::from(type_name.to_owned()) }),
        }
    }

    /// Enabled drivers, in the order they were enabled.
    pub fn enabled(&self) -> impl Iterator<Item = &TypeName> {
        self.order.iter()
    }

    /// Returns the driver instance, building it on first access.
    ///
    /// Construction runs with no explicit parameters. A failed construction is not cached: the
    /// driver stays enabled and the next call tries again.
    ///
    /// # Errors
    /// [`DriverError::NotConfigured`], [`DriverError::NotEnabled`], or
    /// [`DriverError::Construction`] carrying the builder's error.
    pub fn get(&mut self, type_name: &str) -> Result<&Instance, DriverError> {
        self.strategy()?;

        let slot = self
            .drivers
            .get_mut(type_name)
            .ok_or_else(|| DriverError::NotEnabled { type_name: TypeName::from(type_name.to_owned()) })?;

        if matches!(slot, DriverSlot::Enabled) {
            let instance = self.builder.instantiate(type_name, Parameters::new())?;
            debug!(driver = type_name, "Driver instantiated");
            *slot = DriverSlot::Built(instance);
        } else {
            trace!(driver = type_name, "Driver served from cache");
        }

        match slot {
            DriverSlot::Built(instance) => Ok(instance),
            DriverSlot::Enabled => unreachable!("driver slot was built above"),
        }
    }

    /// [`DriverRegistry::get`], downcast to the concrete driver type.
    ///
    /// # Errors
    /// Everything [`DriverRegistry::get`] returns, plus [`DriverError::TypeMismatch`] when the
    /// instance is not a `T`.
    pub fn get_as<T: Any>(&mut self, type_name: &str) -> Result<&T, DriverError> {
        self.get(type_name)?.downcast_ref::<T>().ok_or_else(|| DriverError::TypeMismatch {
            type_name: TypeName::from(type_name.to_owned()),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Configures from `settings`, then enables every listed driver in order.
    ///
    /// Stops at the first failure; drivers enabled before it stay enabled.
    ///
    /// # Errors
    /// Anything [`DriverRegistry::configure`] or [`DriverRegistry::enable`] returns.
    pub fn apply(&mut self, settings: &DriverSettings) -> Result<(), DriverError> {
        self.configure(settings.attribute.as_deref(), settings.contract.as_deref())?;
        for driver in &settings.enabled {
            self.enable(driver)?;
        }
        debug!(enabled = settings.enabled.len(), "Driver settings applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugboard_domain::constants::{ATTRIBUTE_MARKER, DRIVER_ATTRIBUTE_CONTRACT, DRIVER_CONTRACT};
    use plugboard_domain::{Annotation, ConstructionError, TypeInfo, TypeKind};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Fake {
        kind: TypeKind,
        annotations: &'static [&'static str],
        implements: &'static [&'static str],
    }

    /// Answers from a fixed table; no inheritance is computed.
    #[derive(Debug, Default)]
    struct FakeIntrospector {
        types: FxHashMap<&'static str, Fake>,
    }

    impl FakeIntrospector {
        fn declare(
            mut self,
            name: &'static str,
            kind: TypeKind,
            annotations: &'static [&'static str],
            implements: &'static [&'static str],
        ) -> Self {
            self.types.insert(name, Fake { kind, annotations, implements });
            self
        }
    }

    impl TypeIntrospector for FakeIntrospector {
        fn declared_type(&self, name: &str) -> Option<TypeInfo> {
            self.types.get(name).map(|fake| TypeInfo::new(name.to_owned(), fake.kind))
        }

        fn annotations_of(&self, ty: &TypeInfo, annotation: &str) -> Vec<Annotation> {
            self.types
                .get(ty.name.as_str())
                .map(|fake| {
                    fake.annotations.iter().filter(|a| **a == annotation).map(|a| Annotation::new(*a)).collect()
                })
                .unwrap_or_default()
        }

        fn implements_interface(&self, ty: &TypeInfo, target: &str) -> bool {
            self.types.get(ty.name.as_str()).is_some_and(|fake| fake.implements.iter().any(|name| *name == target))
        }

        fn is_interface_or_abstract(&self, ty: &TypeInfo) -> bool {
            matches!(ty.kind, TypeKind::Interface | TypeKind::Abstract)
        }
    }

    #[derive(Debug, Default)]
    struct CountingBuilder {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl InstanceBuilder for CountingBuilder {
        fn instantiate(&self, type_name: &str, _parameters: Parameters) -> Result<Instance, ConstructionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(ConstructionError::NotInstantiable {
                    type_name: type_name.to_owned().into(),
                    reason: "offline".into(),
                });
            }
            Ok(Box::new(type_name.to_owned()))
        }
    }

    fn introspector() -> FakeIntrospector {
        FakeIntrospector::default()
            .declare("StorageDriver", TypeKind::Attribute, &[ATTRIBUTE_MARKER], &[DRIVER_ATTRIBUTE_CONTRACT])
            .declare("StorageContract", TypeKind::Interface, &[], &[DRIVER_CONTRACT])
            .declare("S3Store", TypeKind::Class, &["StorageDriver"], &[])
            .declare("FileStore", TypeKind::Class, &[], &["StorageContract", DRIVER_CONTRACT])
            .declare("Plain", TypeKind::Class, &[], &[])
    }

    fn registry() -> (DriverRegistry, Arc<CountingBuilder>) {
        let builder = Arc::new(CountingBuilder::default());
        (DriverRegistry::new(Arc::new(introspector()), builder.clone()), builder)
    }

    #[test]
    fn everything_but_configure_requires_configuration() {
        let (mut registry, _) = registry();

        assert!(!registry.is_configured());
        assert!(registry.identification().is_none());
        assert!(matches!(registry.supports("FileStore"), Err(DriverError::NotConfigured)));
        assert!(matches!(registry.enable("FileStore"), Err(DriverError::NotConfigured)));
        assert!(matches!(registry.is_enabled("FileStore"), Err(DriverError::NotConfigured)));
        assert!(matches!(registry.is_built("FileStore"), Err(DriverError::NotConfigured)));
        assert!(matches!(registry.get("FileStore"), Err(DriverError::NotConfigured)));
    }

    #[test]
    fn configure_is_one_shot() {
        let (mut registry, _) = registry();
        registry.configure(None, Some("StorageContract")).expect("valid contract");
        assert!(registry.is_configured());

        let err = registry.configure(Some("StorageDriver"), None).expect_err("second configure");
        assert!(matches!(err, DriverError::AlreadyConfigured));
        let err = registry.configure(None, None).expect_err("second configure without identifiers");
        assert!(matches!(err, DriverError::AlreadyConfigured));
        assert_eq!(
            registry.identification().and_then(IdentificationStrategy::contract).map(TypeName::as_str),
            Some("StorageContract")
        );
        assert!(registry.identification().and_then(IdentificationStrategy::attribute).is_none());
    }

    #[test]
    fn failed_configure_leaves_registry_unconfigured() {
        let (mut registry, _) = registry();

        let err = registry.configure(Some("StorageDriver"), Some("Plain")).expect_err("bad contract");
        assert!(matches!(err, DriverError::ContractNotAbstract { ref type_name } if type_name == "Plain"));
        assert!(!registry.is_configured());

        registry.configure(Some("StorageDriver"), None).expect("retry succeeds");
    }

    #[test]
    fn configure_reports_each_validation_failure() {
        let cases: [(Option<&str>, Option<&str>, u16); 8] = [
            (None, None, 2202),
            (Some("Missing"), None, 2203),
            (Some("StorageContract"), None, 2203),
            (Some("Plain"), None, 2204),
            (Some(ATTRIBUTE_MARKER), None, 2204),
            (None, Some("Missing"), 2206),
            (None, Some("FileStore"), 2207),
            (Some("StorageDriver"), Some("Missing"), 2206),
        ];

        let introspector = introspector().declare(ATTRIBUTE_MARKER, TypeKind::Attribute, &[], &[]);
        let introspector: Arc<dyn TypeIntrospector> = Arc::new(introspector);
        for (attribute, contract, code) in cases {
            let mut registry = DriverRegistry::new(introspector.clone(), Arc::new(CountingBuilder::default()));
            let err = registry.configure(attribute, contract).expect_err("invalid identification");
            assert_eq!(err.code(), code, "{attribute:?} / {contract:?}: {err}");
            assert!(!registry.is_configured());
        }
    }

    #[test]
    fn attribute_and_contract_markers_are_required() {
        let introspector = introspector()
            .declare("LooseAttribute", TypeKind::Attribute, &[ATTRIBUTE_MARKER], &[])
            .declare("LooseContract", TypeKind::Interface, &[], &[]);
        let introspector: Arc<dyn TypeIntrospector> = Arc::new(introspector);

        let mut registry = DriverRegistry::new(introspector.clone(), Arc::new(CountingBuilder::default()));
        let err = registry.configure(Some("LooseAttribute"), None).expect_err("no attribute contract");
        assert!(matches!(err, DriverError::AttributeContractUnimplemented { .. }));

        let err = registry.configure(None, Some("LooseContract")).expect_err("no driver contract");
        assert!(matches!(err, DriverError::ContractBaseUnimplemented { .. }));
        assert_eq!(err.to_string(), format!("The contract exists but does not extend {DRIVER_CONTRACT}: LooseContract"));
    }

    #[test]
    fn supports_by_attribute_or_contract() {
        let (mut registry, _) = registry();
        registry.configure(Some("StorageDriver"), Some("StorageContract")).expect("both valid");

        assert_eq!(registry.supports("S3Store").ok(), Some(true));
        assert_eq!(registry.supports("FileStore").ok(), Some(true));
        assert_eq!(registry.supports("Plain").ok(), Some(false));
        assert_eq!(registry.supports("Missing").ok(), Some(false));
        assert_eq!(registry.supports("StorageContract").ok(), Some(false));
    }

    #[test]
    fn enable_rejects_unsupported_and_duplicates() {
        let (mut registry, _) = registry();
        registry.configure(None, Some("StorageContract")).expect("valid contract");

        let err = registry.enable("S3Store").expect_err("attribute is not configured");
        assert!(matches!(err, DriverError::NotSupported { ref type_name } if type_name == "S3Store"));
        assert_eq!(registry.is_enabled("S3Store").ok(), Some(false));

        registry.enable("FileStore").expect("supported");
        let err = registry.enable("FileStore").expect_err("duplicate");
        assert_eq!(err.code(), 2210);
        assert_eq!(registry.enabled().collect::<Vec<_>>(), [&TypeName::from("FileStore")]);
    }

    #[test]
    fn get_builds_once_and_caches() {
        let (mut registry, builder) = registry();
        registry.configure(Some("StorageDriver"), Some("StorageContract")).expect("both valid");
        registry.enable("FileStore").expect("supported");
        assert_eq!(builder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(registry.is_built("FileStore").ok(), Some(false));

        let first: *const Instance = registry.get("FileStore").expect("built");
        let second: *const Instance = registry.get("FileStore").expect("cached");

        assert_eq!(first, second);
        assert_eq!(builder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.is_built("FileStore").ok(), Some(true));
        assert_eq!(registry.get_as::<String>("FileStore").ok().map(String::as_str), Some("FileStore"));
    }

    #[test]
    fn get_requires_enablement() {
        let (mut registry, builder) = registry();
        registry.configure(Some("StorageDriver"), None).expect("valid attribute");

        let err = registry.get("S3Store").expect_err("not enabled");
        assert!(matches!(err, DriverError::NotEnabled { ref type_name } if type_name == "S3Store"));
        assert!(matches!(registry.is_built("S3Store"), Err(DriverError::NotEnabled { .. })));
        assert_eq!(builder.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failed_construction_is_retried() {
        let (mut registry, builder) = registry();
        registry.configure(Some("StorageDriver"), None).expect("valid attribute");
        registry.enable("S3Store").expect("supported");

        builder.failing.store(true, Ordering::SeqCst);
        let err = registry.get("S3Store").expect_err("builder fails");
        assert_eq!(err.code(), 2200);
        assert_eq!(err.to_string(), "Type is not instantiable: S3Store (offline)");
        assert_eq!(registry.is_enabled("S3Store").ok(), Some(true));
        assert_eq!(registry.is_built("S3Store").ok(), Some(false));

        builder.failing.store(false, Ordering::SeqCst);
        registry.get("S3Store").expect("second attempt builds");
        assert_eq!(builder.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn get_as_reports_type_mismatch() {
        let (mut registry, _) = registry();
        registry.configure(Some("StorageDriver"), None).expect("valid attribute");
        registry.enable("S3Store").expect("supported");

        let err = registry.get_as::<u32>("S3Store").expect_err("instance is a String");
        assert!(matches!(err, DriverError::TypeMismatch { expected: "u32", .. }));
    }

    #[test]
    fn apply_configures_and_enables_in_order() {
        let (mut registry, _) = registry();
        let settings = DriverSettings {
            attribute: Some("StorageDriver".into()),
            contract: Some("StorageContract".into()),
            enabled: vec!["S3Store".into(), "FileStore".into()],
        };

        registry.apply(&settings).expect("settings are valid");
        assert_eq!(registry.enabled().map(TypeName::as_str).collect::<Vec<_>>(), ["S3Store", "FileStore"]);

        assert!(matches!(registry.apply(&settings), Err(DriverError::AlreadyConfigured)));
    }
}
