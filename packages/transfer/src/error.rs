//! Error types for transfer operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

/// Errors that can occur while transferring a single file.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Source and destination resolve to the same file.
    #[error("{} and {} are the same file", source_path.display(), target_path.display())]
    SameFile {
        /// Source file path.
        source_path: PathBuf,
        /// Target file path.
        target_path: PathBuf,
    },

    /// Failed to open the source for reading.
    #[error("Could not open {} for reading: {io_error}", path.display())]
    OpenSource {
        /// The source path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to open the destination for writing.
    #[error("Could not open {} for writing: {io_error}", path.display())]
    OpenDestination {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// A read or write failed while streaming.
    #[error("Problem when transferring {} to {}: {io_error}", source_path.display(), target_path.display())]
    Io {
        /// Source file path.
        source_path: PathBuf,
        /// Target file path.
        target_path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to read or recreate a symlink.
    #[error("Failed to copy symlink {} to {}: {io_error}", source_path.display(), target_path.display())]
    Symlink {
        /// The symlink path.
        source_path: PathBuf,
        /// The new symlink path.
        target_path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// The user interrupted the transfer.
    #[error("Interrupted by user")]
    Interrupted,
}

/// Errors that can occur while building a transfer plan.
///
/// These are all fatal: nothing is transferred when planning fails.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// A source path does not exist.
    #[error("{} does not exist", path.display())]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Several sources were given but the destination is not a directory.
    #[error("{} is not an existing directory", path.display())]
    DestinationNotDirectory {
        /// The destination path.
        path: PathBuf,
    },

    /// A directory would be copied into itself.
    #[error("Cannot transfer {} into itself ({})", source_path.display(), target_path.display())]
    DestinationInsideSource {
        /// The source directory.
        source_path: PathBuf,
        /// The destination directory.
        target_path: PathBuf,
    },

    /// A source path has no usable file name.
    #[error("Cannot determine a file name for {}", path.display())]
    InvalidSource {
        /// The source path.
        path: PathBuf,
    },

    /// Failed to create a destination directory.
    #[error("Failed to create directory {}: {io_error}", path.display())]
    CreateDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to list a source directory.
    #[error("Failed to read directory {}: {message}", path.display())]
    ReadDirError {
        /// The directory path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to get file metadata.
    #[error("Failed to get metadata for {}: {io_error}", path.display())]
    MetadataError {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },
}

/// Errors that abort a whole transfer run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Planning failed.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// A file failed and errors are not being ignored, or the run was interrupted.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl RunError {
    /// Whether the run stopped because of a user interrupt.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        matches!(self, Self::Transfer(TransferError::Interrupted))
    }
}
