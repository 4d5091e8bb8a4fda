//! Kernel utilities shared by plugboard hosts.
//! Keep this crate lightweight; for now it only carries layered configuration loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use plugboard_kernel::config::load_settings;
//!
//! let settings = load_settings(Some("plugboard.toml")).unwrap_or_default();
//! println!("{} drivers to enable", settings.drivers.enabled.len());
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;

pub use plugboard_domain as domain;
