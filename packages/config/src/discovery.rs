//! Configuration file discovery.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "PCP_CONFIG";

/// Locate the configuration file.
///
/// `$PCP_CONFIG` wins when set; otherwise `pcp/config.toml` under the
/// platform configuration directory. The returned path may not exist.
#[must_use]
pub fn find_config() -> Option<PathBuf> {
    resolve_config_path(std::env::var_os(CONFIG_ENV), dirs::config_dir())
}

fn resolve_config_path(explicit: Option<OsString>, config_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit.filter(|path| !path.is_empty()) {
        log::debug!("Using config from ${CONFIG_ENV}");
        return Some(PathBuf::from(path));
    }

    config_dir.map(|dir| dir.join("pcp").join("config.toml"))
}
