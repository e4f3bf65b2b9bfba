//! Parsing and validation of `permlink.toml` configuration files.
//!
//! This crate reads the linker configuration and produces a strongly-typed
//! [`LinkerConfig`], and resolves the multi-valued configuration properties
//! (such as the always-cache static file list) a link pass consumes.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod properties;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use properties::{
    configured_static_files, resolve_properties, ConfigurationProperty, STATIC_FILES_PROPERTY,
};
pub use types::*;
