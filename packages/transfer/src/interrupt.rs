//! Cooperative interruption.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::TransferError;

/// Shared flag observed between chunks and between files.
///
/// Cloning shares the flag, so a signal handler can hold one clone while the
/// transfer loop polls another.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Create a flag that is not triggered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the transfer to stop at the next chunk boundary.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether a stop was requested.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Fail with [`TransferError::Interrupted`] if a stop was requested.
    ///
    /// # Errors
    ///
    /// * If the flag was triggered
    pub fn check(&self) -> Result<(), TransferError> {
        if self.is_triggered() {
            Err(TransferError::Interrupted)
        } else {
            Ok(())
        }
    }
}
