use plugboard_domain::config::DriverSettings;
use serde_json::json;

#[test]
fn settings_default_to_nothing() {
    let settings = DriverSettings::default();
    assert!(settings.attribute.is_none());
    assert!(settings.contract.is_none());
    assert!(settings.enabled.is_empty());
    assert!(!settings.has_identification());
}

#[test]
fn settings_deserialize_with_partial_fields() {
    let raw = json!({
        "contract": "StorageDriverContract",
        "enabled": ["FileStore", "MemoryStore"]
    });

    let settings: DriverSettings = serde_json::from_value(raw).expect("settings deserialize");
    assert!(settings.attribute.is_none());
    assert_eq!(settings.contract.as_deref(), Some("StorageDriverContract"));
    assert_eq!(settings.enabled.len(), 2);
    assert_eq!(settings.enabled[1], "MemoryStore");
    assert!(settings.has_identification());
}
