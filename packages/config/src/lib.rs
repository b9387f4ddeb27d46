//! Configuration loading for pcp.
//!
//! An optional TOML file supplies defaults for the command-line flags:
//!
//! ```toml
//! safe = true
//! globalProgress = true
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use pcp_config::load_config;
//!
//! let config = load_config()?;
//! if config.safe {
//!     println!("never overwriting");
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod discovery;
mod error;
mod toml_loader;
mod types;

pub use discovery::{CONFIG_ENV, find_config};
pub use error::ConfigError;
pub use toml_loader::load_toml_config;
pub use types::Config;

use std::path::Path;

/// Load the configuration from its default location.
///
/// A missing file yields [`Config::default`].
///
/// # Errors
///
/// * If the file exists but cannot be read
/// * If the file cannot be parsed
pub fn load_config() -> Result<Config, ConfigError> {
    match find_config() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

/// Load the configuration from `path`, falling back to defaults if it is absent.
///
/// # Errors
///
/// * If the file exists but cannot be read
/// * If the file cannot be parsed
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        log::debug!("No config file at {}", path.display());
        return Ok(Config::default());
    }

    load_toml_config(path)
}
