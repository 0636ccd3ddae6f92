//! Parsing and validation of `vscan.toml` scan configuration files.
//!
//! This crate reads the optional configuration file and produces a strongly-typed
//! [`ScanConfig`]. Every section has defaults, so an absent file and an empty
//! file behave identically.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
