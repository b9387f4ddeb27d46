//! Transfer options.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::struct_excessive_bools)]

/// Options for a transfer run, passed explicitly to every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferOptions {
    /// Delete each source after it was transferred successfully.
    pub move_files: bool,
    /// Copy timestamps and ownership in addition to permission bits.
    pub preserve: bool,
    /// Never overwrite an existing destination.
    pub safe: bool,
    /// Ask before overwriting an existing destination.
    pub interactive: bool,
    /// Keep going after a per-file failure, collecting the error.
    pub ignore_errors: bool,
    /// Show one indicator for the whole batch instead of one per file.
    pub global_progress: bool,
    /// Include hidden entries when recursing into directories.
    pub all_files: bool,
}
