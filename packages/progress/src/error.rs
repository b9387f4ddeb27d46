//! Error types for line construction.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Errors raised when a [`crate::Line`] is built from an invalid component list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// The line has nothing to absorb the leftover width.
    #[error("A line needs exactly one elastic component, found none")]
    NoElasticComponent,

    /// More than one component wants the leftover width.
    #[error("A line needs exactly one elastic component, found {count}")]
    TooManyElasticComponents {
        /// Number of elastic components found.
        count: usize,
    },
}
