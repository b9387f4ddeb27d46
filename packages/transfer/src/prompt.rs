//! Overwrite confirmation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

/// Asks whether an existing destination may be overwritten.
///
/// Only consulted in interactive mode. Closures taking a `&Path` implement
/// this trait directly.
pub trait OverwritePrompt {
    /// Return `true` to overwrite `destination`, `false` to skip it.
    fn confirm_overwrite(&mut self, destination: &Path) -> bool;
}

impl<F> OverwritePrompt for F
where
    F: FnMut(&Path) -> bool,
{
    fn confirm_overwrite(&mut self, destination: &Path) -> bool {
        self(destination)
    }
}
