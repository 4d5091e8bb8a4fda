use plugboard_kernel::config::{ConfigError, Map, load_config, load_settings, load_settings_with};
use std::fs;
use tempfile::tempdir;

#[derive(Debug, serde::Deserialize)]
struct Empty {}

#[test]
fn loads_driver_and_log_settings_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("plugboard.toml");
    fs::write(
        &path,
        r#"
[drivers]
attribute = "StorageDriver"
contract = "StorageDriverContract"
enabled = ["FileStore", "S3Store"]

[log]
level = "debug"
json = true
"#,
    )?;

    let config = load_settings(Some(&path))?;

    assert_eq!(config.drivers.attribute.as_deref(), Some("StorageDriver"));
    assert_eq!(config.drivers.contract.as_deref(), Some("StorageDriverContract"));
    assert_eq!(config.drivers.enabled, ["FileStore", "S3Store"]);
    assert_eq!(config.log.level, "debug");
    assert!(config.log.json);
    assert!(config.log.filter.is_none());
    Ok(())
}

#[test]
fn missing_sections_fall_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("plugboard.json");
    fs::write(&path, r#"{ "drivers": { "contract": "StorageDriverContract" } }"#)?;

    let config = load_settings(Some(&path))?;

    assert!(config.drivers.has_identification());
    assert!(config.drivers.enabled.is_empty());
    assert_eq!(config.log.level, "info");
    Ok(())
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempdir().expect("temp dir");
    let err = load_config::<Empty>(Some(dir.path().join("absent.toml")))
        .expect_err("file is required");
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().starts_with("Config error (Failed to build config)"));
}

#[test]
fn environment_overrides_the_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("plugboard.toml");
    fs::write(
        &path,
        r#"
[drivers]
attribute = "StorageDriver"
contract = "StorageDriverContract"
enabled = ["MemoryStore"]
"#,
    )?;

    let env: Map<String, String> = [
        ("PLUGBOARD__DRIVERS__CONTRACT", "FromEnv"),
        ("PLUGBOARD__DRIVERS__ENABLED", "FileStore,S3Store"),
        ("UNRELATED__DRIVERS__CONTRACT", "Ignored"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_owned(), value.to_owned()))
    .collect();

    let config = load_settings_with(Some(&path), Some(env))?;

    assert_eq!(config.drivers.attribute.as_deref(), Some("StorageDriver"));
    assert_eq!(config.drivers.contract.as_deref(), Some("FromEnv"));
    assert_eq!(config.drivers.enabled, ["FileStore", "S3Store"]);
    Ok(())
}
