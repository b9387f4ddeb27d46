//! Configuration types for pcp.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::struct_excessive_bools)]

use serde::{Deserialize, Serialize};

/// Defaults applied before command-line flags.
///
/// Every key is optional; a flag given on the command line always wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Never overwrite existing files.
    #[serde(default)]
    pub safe: bool,

    /// Keep timestamps and ownership.
    #[serde(default)]
    pub preserve: bool,

    /// Include hidden files when copying directories.
    #[serde(default)]
    pub all_files: bool,

    /// Keep going when a file fails.
    #[serde(default)]
    pub ignore_errors: bool,

    /// Show one progress window for the whole batch.
    #[serde(default)]
    pub global_progress: bool,

    /// Draw the pac-man progress bar.
    #[serde(default)]
    pub candy: bool,
}
