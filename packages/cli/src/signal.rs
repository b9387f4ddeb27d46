//! Ctrl-C handling.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use pcp_transfer::Interrupt;

/// Raise `interrupt` when the user presses Ctrl-C.
///
/// The transfer loop notices the flag before its next chunk, closes both
/// files and unwinds with an interrupt error.
///
/// # Errors
///
/// * If a handler cannot be installed
pub fn install(interrupt: &Interrupt) -> Result<(), ctrlc::Error> {
    let handle = interrupt.clone();
    ctrlc::set_handler(move || {
        handle.trigger();
    })
}
