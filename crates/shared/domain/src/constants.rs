/// Built-in meta annotation carried by every attribute type.
pub const ATTRIBUTE_MARKER: &str = "Attribute";

/// Marker contract every driver contract must extend.
pub const DRIVER_CONTRACT: &str = "DriverContract";

/// Marker contract every driver attribute type must implement.
pub const DRIVER_ATTRIBUTE_CONTRACT: &str = "DriverAttributeContract";
