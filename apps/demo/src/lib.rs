//! # Plugboard Demo
//!
//! A small storage "host" wired through plugboard: a type catalog describing a few storage
//! backends, a container that knows how to build them, and registries identifying them by
//! attribute, by contract, or by both.
//!
//! ## Example
//! ```no_run
//! use plugboard_demo::{general_usage, provider};
//!
//! let provider = provider()?;
//! for report in general_usage(&provider)? {
//!     println!("{report:?}");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use plugboard::prelude::*;
use std::sync::Arc;
use tracing::info;

pub const STORAGE_ATTRIBUTE: &str = "StorageDriver";
pub const STORAGE_CONTRACT: &str = "StorageDriverContract";
pub const ABSTRACT_STORE: &str = "AbstractStore";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    pub zone: String,
}

#[derive(Debug)]
pub struct FileStore {
    pub root: String,
    pub clock: Clock,
}

#[derive(Debug)]
pub struct S3Store {
    pub bucket: String,
}

#[derive(Debug)]
pub struct MemoryStore {
    pub capacity: usize,
}

/// Declares the demo's storage types.
///
/// # Errors
/// Fails only if a declaration is duplicated.
pub fn catalog() -> Result<TypeCatalog> {
    let catalog = TypeCatalog::new()
        .with(TypeDecl::attribute(STORAGE_ATTRIBUTE).extends(DRIVER_ATTRIBUTE_CONTRACT))?
        .with(TypeDecl::interface(STORAGE_CONTRACT).extends(DRIVER_CONTRACT))?
        .with(TypeDecl::abstract_base(ABSTRACT_STORE).extends(DRIVER_CONTRACT))?
        .with(TypeDecl::class("Clock"))?
        .with(TypeDecl::class("FileStore").extends(STORAGE_CONTRACT))?
        .with(
            TypeDecl::class("S3Store")
                .annotated(Annotation::new(STORAGE_ATTRIBUTE).with_argument("scheme", "s3")),
        )?
        .with(TypeDecl::class("MemoryStore").extends(ABSTRACT_STORE))?;
    Ok(catalog)
}

/// Constructors for every instantiable demo type.
#[must_use]
pub fn container(catalog: Arc<TypeCatalog>) -> Container {
    Container::new(catalog)
        .with(Recipe::new("Clock", |args| Ok(Clock { zone: args.take("zone")? })).value_or("zone", String::from("UTC")))
        .with(
            Recipe::new("FileStore", |args| {
                Ok(FileStore { root: args.take("root")?, clock: args.take("clock")? })
            })
            .value_or("root", String::from("./data"))
            .service("clock", "Clock"),
        )
        .with(
            Recipe::new("S3Store", |args| Ok(S3Store { bucket: args.take("bucket")? }))
                .value_or("bucket", String::from("plugboard-demo")),
        )
        .with(
            Recipe::new("MemoryStore", |args| Ok(MemoryStore { capacity: args.take("capacity")? }))
                .value_or("capacity", 1024_usize),
        )
}

/// A provider over the demo catalog and container.
///
/// # Errors
/// Propagates catalog construction failures.
pub fn provider() -> Result<DriverManagerProvider> {
    let catalog = Arc::new(catalog().context("Failed to declare demo types")?);
    let container = container(catalog.clone());
    Ok(DriverManagerProvider::new(catalog, Arc::new(container)))
}

/// What one configured registry recognises among the demo's candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub label: &'static str,
    pub supported: Vec<&'static str>,
    pub built: Vec<&'static str>,
}

const CANDIDATES: [&str; 4] = ["FileStore", "S3Store", "MemoryStore", "Clock"];

/// Three consumers, each configuring its own registry: by attribute, by contract, and by both
/// (the attribute, or the abstract base). Every supported driver is enabled and built.
///
/// # Errors
/// Any registry or construction failure.
pub fn general_usage(provider: &DriverManagerProvider) -> Result<Vec<Report>> {
    let setups: [(&'static str, Option<&str>, Option<&str>); 3] = [
        ("attribute", Some(STORAGE_ATTRIBUTE), None),
        ("contract", None, Some(STORAGE_CONTRACT)),
        ("attribute or abstract base", Some(STORAGE_ATTRIBUTE), Some(ABSTRACT_STORE)),
    ];

    setups
        .into_iter()
        .map(|(label, attribute, contract)| -> Result<Report> {
            let mut registry = provider.create();
            registry.configure(attribute, contract).with_context(|| format!("Configuring by {label}"))?;

            let mut report = Report { label, supported: Vec::new(), built: Vec::new() };
            for candidate in CANDIDATES {
                if registry.supports(candidate)? {
                    registry.enable(candidate)?;
                    report.supported.push(candidate);
                }
            }
            for driver in &report.supported {
                registry.get(driver).with_context(|| format!("Building {driver}"))?;
                report.built.push(*driver);
            }

            info!(label, supported = ?report.supported, "Registry ready");
            Ok(report)
        })
        .collect()
}

/// Applies `settings` to a fresh registry and builds every enabled driver.
///
/// Returns the names of the built drivers, in enablement order.
///
/// # Errors
/// Invalid settings or a failing driver constructor.
pub fn run_with_settings(provider: &DriverManagerProvider, settings: &DriverSettings) -> Result<Vec<TypeName>> {
    let mut registry = provider.create_with(settings).context("Invalid driver settings")?;
    let enabled: Vec<TypeName> = registry.enabled().cloned().collect();

    for driver in &enabled {
        registry.get(driver).with_context(|| format!("Building {driver}"))?;
        info!(driver = %driver, "Driver ready");
    }
    Ok(enabled)
}
