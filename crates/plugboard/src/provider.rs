use plugboard_domain::config::DriverSettings;
use plugboard_domain::{InstanceBuilder, TypeIntrospector};
use plugboard_registry::{DriverError, DriverRegistry};
use std::sync::Arc;
use tracing::debug;

#[cfg(feature = "shared")]
use std::sync::OnceLock;

/// Service name under which hosts request a registry from the provider.
pub const DRIVER_REGISTRY: &str = "DriverRegistry";

/// A registry shared by every holder; calls are serialized by the lock.
#[cfg(feature = "shared")]
pub type SharedRegistry = Arc<parking_lot::Mutex<DriverRegistry>>;

/// Hands out [`DriverRegistry`] instances wired to the host's introspector and builder.
///
/// Each consumer normally owns its registry (one per driver family), so [`create`] returns a
/// fresh, unconfigured one on every call. With the `shared` feature, [`shared`] additionally
/// offers a single registry built on first use.
///
/// [`create`]: DriverManagerProvider::create
/// [`shared`]: DriverManagerProvider::shared
#[derive(Debug, Clone)]
pub struct DriverManagerProvider {
    introspector: Arc<dyn TypeIntrospector>,
    builder: Arc<dyn InstanceBuilder>,
    #[cfg(feature = "shared")]
    shared: Arc<OnceLock<SharedRegistry>>,
}

impl DriverManagerProvider {
    #[must_use]
    pub fn new(introspector: Arc<dyn TypeIntrospector>, builder: Arc<dyn InstanceBuilder>) -> Self {
        Self {
            introspector,
            builder,
            #[cfg(feature = "shared")]
            shared: Arc::new(OnceLock::new()),
        }
    }

    /// Whether this provider serves `service`.
    #[must_use]
    pub fn supports(&self, service: &str) -> bool {
        service == DRIVER_REGISTRY
    }

    /// Registries are not singletons: [`DriverManagerProvider::create`] builds a new one per call.
    #[must_use]
    pub const fn is_singleton_expected(&self) -> bool {
        false
    }

    /// A fresh, unconfigured registry.
    #[must_use]
    pub fn create(&self) -> DriverRegistry {
        debug!("Driver registry created");
        DriverRegistry::new(self.introspector.clone(), self.builder.clone())
    }

    /// A fresh registry with `settings` applied.
    ///
    /// # Errors
    /// Whatever [`DriverRegistry::apply`] reports for the settings.
    pub fn create_with(&self, settings: &DriverSettings) -> Result<DriverRegistry, DriverError> {
        let mut registry = self.create();
        registry.apply(settings)?;
        Ok(registry)
    }

    /// The registry shared by all clones of this provider, built on first call.
    #[cfg(feature = "shared")]
    #[must_use]
    pub fn shared(&self) -> SharedRegistry {
        self.shared
            .get_or_init(|| {
                debug!("Shared driver registry initialized");
                Arc::new(parking_lot::Mutex::new(self.create()))
            })
            .clone()
    }
}
