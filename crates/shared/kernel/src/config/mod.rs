use config::{Config, Environment, File};
pub use config::Map;
use plugboard_domain::config::DriverSettings;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

pub const ENV_PREFIX: &str = "PLUGBOARD";
pub const DEFAULT_CONFIG_PATH: &str = "plugboard";

/// Custom error type for config loading.
#[plugboard_derive::plugboard_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Settings of a plugboard host: which drivers to identify and enable, and how to log.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlugboardConfig {
    pub drivers: DriverSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default level directive (`error` .. `trace`).
    pub level: String,
    /// Optional `EnvFilter` directives, e.g. `plugboard_registry=trace`.
    pub filter: Option<String>,
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, json: false }
    }
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from a file (e.g., `plugboard.toml`). If no path is provided,
///    it defaults to [`DEFAULT_CONFIG_PATH`] with any supported extension.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with
///    `PLUGBOARD__`. Nested structures are accessed using double underscores
///    (e.g., `PLUGBOARD__DRIVERS__CONTRACT` maps to `drivers.contract`). The
///    `drivers.enabled` list accepts comma separated values.
///
/// # Errors
/// This function will return an error if:
/// * The specified (or default) configuration file cannot be found.
/// * The content of the file does not match the structure of type `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with(path, None)
}

/// [`load_config`] with the environment layer read from `env` instead of the process
/// environment when it is `Some`. Keys keep their `PLUGBOARD__` prefix.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_config_with<T>(path: Option<impl AsRef<Path>>, env: Option<Map<String, String>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake)
                .list_separator(",")
                .with_list_parse_key("drivers.enabled")
                .try_parsing(true)
                .source(env),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// [`load_config`] for the host-level [`PlugboardConfig`].
///
/// # Errors
/// Same as [`load_config`].
pub fn load_settings(path: Option<impl AsRef<Path>>) -> Result<PlugboardConfig, ConfigError> {
    load_settings_with(path, None)
}

/// [`load_settings`] with an explicit environment layer, see [`load_config_with`].
///
/// # Errors
/// Same as [`load_config`].
pub fn load_settings_with(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<PlugboardConfig, ConfigError> {
    let config: PlugboardConfig = load_config_with(path, env)?;
    info!(
        attribute = ?config.drivers.attribute,
        contract = ?config.drivers.contract,
        enabled = config.drivers.enabled.len(),
        "Driver settings loaded"
    );
    Ok(config)
}
