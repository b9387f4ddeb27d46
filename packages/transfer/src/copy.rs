//! Single-file transfer: chunked streaming, symlinks, overwrite policy and metadata.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::error::TransferError;
use crate::interrupt::Interrupt;
use crate::options::TransferOptions;
use crate::plan::WorkItem;
use crate::prompt::OverwritePrompt;

/// Size of a single read/write chunk.
pub const BUFFER_SIZE: usize = 100 * 1024;

/// Result of transferring one work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The file content was streamed.
    Copied {
        /// Number of bytes written.
        bytes: u64,
    },
    /// The symlink was recreated at the destination.
    Symlinked,
    /// The destination existed and was left untouched.
    Skipped,
}

/// What happened to one work item, plus non-fatal problems worth showing.
///
/// Warnings are returned rather than logged so the caller can print them
/// without tearing a half-drawn progress line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReport {
    /// What was done.
    pub outcome: TransferOutcome,
    /// Metadata, skip and cleanup problems that did not fail the transfer.
    pub warnings: Vec<String>,
}

impl TransferReport {
    const fn new(outcome: TransferOutcome, warnings: Vec<String>) -> Self {
        Self { outcome, warnings }
    }
}

/// Transfer one work item.
///
/// `on_chunk` is called with the size of every chunk written, and once with
/// `0` when the file is complete.
///
/// # Arguments
///
/// * `item` - What to transfer and where
/// * `options` - Overwrite policy, metadata preservation and move mode
/// * `prompt` - Consulted when the destination exists in interactive mode
/// * `interrupt` - Polled before every chunk
/// * `on_chunk` - Progress callback
///
/// # Errors
///
/// * If source and destination are the same file
/// * If the source cannot be opened or the destination cannot be created
/// * If a read or write fails mid-stream
/// * If a symlink cannot be read or recreated, or a non-empty directory is in its way
/// * If the interrupt flag is raised
pub fn transfer_file<F>(
    item: &WorkItem,
    options: &TransferOptions,
    prompt: &mut dyn OverwritePrompt,
    interrupt: &Interrupt,
    mut on_chunk: F,
) -> Result<TransferReport, TransferError>
where
    F: FnMut(u64),
{
    let source = item.source.as_path();
    let target = item.destination.as_path();

    log::debug!("Transferring {} -> {}", source.display(), target.display());

    if is_same_file(source, target) {
        return Err(TransferError::SameFile {
            source_path: source.to_path_buf(),
            target_path: target.to_path_buf(),
        });
    }

    let mut warnings = Vec::new();
    let source_is_symlink = fs::symlink_metadata(source)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);

    if source_is_symlink {
        copy_symlink(source, target)?;
        on_chunk(0);
        if options.move_files {
            remove_source(source, &mut warnings);
        }
        return Ok(TransferReport::new(TransferOutcome::Symlinked, warnings));
    }

    if fs::symlink_metadata(target).is_ok()
        && !may_overwrite(target, options, prompt, &mut warnings)
    {
        return Ok(TransferReport::new(TransferOutcome::Skipped, warnings));
    }

    let bytes = stream(source, target, interrupt, &mut on_chunk)?;
    on_chunk(0);

    copy_metadata(source, target, options.preserve, &mut warnings);

    if options.move_files {
        remove_source(source, &mut warnings);
    }

    Ok(TransferReport::new(
        TransferOutcome::Copied { bytes },
        warnings,
    ))
}

fn may_overwrite(
    target: &Path,
    options: &TransferOptions,
    prompt: &mut dyn OverwritePrompt,
    warnings: &mut Vec<String>,
) -> bool {
    if options.safe {
        warnings.push(format!("Not overwriting {}", target.display()));
        return false;
    }

    if options.interactive {
        let confirmed = prompt.confirm_overwrite(target);
        if !confirmed {
            log::debug!("Skipping {}", target.display());
        }
        return confirmed;
    }

    true
}

fn stream<F>(
    source: &Path,
    target: &Path,
    interrupt: &Interrupt,
    on_chunk: &mut F,
) -> Result<u64, TransferError>
where
    F: FnMut(u64),
{
    let mut reader = File::open(source).map_err(|e| TransferError::OpenSource {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    // A dangling symlink at the destination would be followed by File::create
    if fs::symlink_metadata(target).is_ok_and(|m| m.file_type().is_symlink()) {
        fs::remove_file(target).map_err(|e| TransferError::OpenDestination {
            path: target.to_path_buf(),
            io_error: e,
        })?;
    }

    let mut writer = File::create(target).map_err(|e| TransferError::OpenDestination {
        path: target.to_path_buf(),
        io_error: e,
    })?;

    let io_error = |e| TransferError::Io {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    };

    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut written = 0u64;

    loop {
        interrupt.check()?;

        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(io_error(e)),
        };

        writer.write_all(&buffer[..read]).map_err(io_error)?;
        written += read as u64;
        on_chunk(read as u64);
    }

    writer.flush().map_err(io_error)?;

    log::trace!(
        "Streamed {written} bytes {} -> {}",
        source.display(),
        target.display()
    );

    Ok(written)
}

/// Copy permission bits, plus timestamps and ownership when preserving.
///
/// Failures are reported but never fail the transfer.
fn copy_metadata(source: &Path, target: &Path, preserve: bool, warnings: &mut Vec<String>) {
    let metadata = match fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(e) => {
            warnings.push(format!("Could not read metadata of {}: {e}", source.display()));
            return;
        }
    };

    if let Err(e) = fs::set_permissions(target, metadata.permissions()) {
        warnings.push(format!("Could not set permissions on {}: {e}", target.display()));
    }

    if !preserve {
        return;
    }

    let accessed = filetime::FileTime::from_last_access_time(&metadata);
    let modified = filetime::FileTime::from_last_modification_time(&metadata);
    if let Err(e) = filetime::set_file_times(target, accessed, modified) {
        warnings.push(format!("Could not set times on {}: {e}", target.display()));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        if let Err(e) = std::os::unix::fs::chown(target, Some(metadata.uid()), Some(metadata.gid()))
        {
            warnings.push(format!("Could not set ownership on {}: {e}", target.display()));
        }
    }
}

/// Recreate a symlink at `target`, replacing a file, link or empty directory.
fn copy_symlink(source: &Path, target: &Path) -> Result<(), TransferError> {
    let symlink_error = |e| TransferError::Symlink {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    };

    let link_target = fs::read_link(source).map_err(symlink_error)?;

    if let Ok(existing) = fs::symlink_metadata(target) {
        // A directory in the way is only replaced if it is empty
        if existing.is_dir() {
            fs::remove_dir(target).map_err(symlink_error)?;
        } else {
            fs::remove_file(target).map_err(symlink_error)?;
        }
    }

    #[cfg(unix)]
    std::os::unix::fs::symlink(&link_target, target).map_err(symlink_error)?;

    #[cfg(windows)]
    {
        let resolved = source
            .parent()
            .map_or_else(|| link_target.clone(), |parent| parent.join(&link_target));
        if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(&link_target, target).map_err(symlink_error)?;
        } else {
            std::os::windows::fs::symlink_file(&link_target, target).map_err(symlink_error)?;
        }
    }

    log::trace!(
        "Symlinked {} -> {} (target: {})",
        source.display(),
        target.display(),
        link_target.display()
    );

    Ok(())
}

fn remove_source(source: &Path, warnings: &mut Vec<String>) {
    log::debug!("Removing {}", source.display());
    if let Err(e) = fs::remove_file(source) {
        warnings.push(format!("Could not remove {}: {e}", source.display()));
    }
}

/// Whether `source` and `target` name the same file.
///
/// Symlink sources are compared without following them, since they are
/// recreated rather than read.
fn is_same_file(source: &Path, target: &Path) -> bool {
    let Ok(source_link) = fs::symlink_metadata(source) else {
        return false;
    };
    let follow = !source_link.file_type().is_symlink();

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        let stat = |path: &Path| {
            if follow {
                fs::metadata(path)
            } else {
                fs::symlink_metadata(path)
            }
        };

        match (stat(source), stat(target)) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    {
        if follow {
            match (fs::canonicalize(source), fs::canonicalize(target)) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            }
        } else {
            path_clean::clean(source) == path_clean::clean(target)
        }
    }
}
