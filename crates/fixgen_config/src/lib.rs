//! Parsing and validation of `fixgen.toml` generator configuration.
//!
//! The file sets the defaults that fixed-point factories fall back to when a
//! caller does not give a width, binary point or signedness explicitly.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::{FixedDefaults, GeneratorConfig};
