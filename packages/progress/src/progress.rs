//! Progress snapshot shared between the transfer loop and the indicators.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Progress information for a running transfer.
///
/// Owned by the transfer loop and handed to indicators by reference.
/// `file_done <= file_size` and `total_done <= total_size` hold after every
/// mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    /// 1-based ordinal of the file in flight.
    pub index: usize,
    /// Number of files in the batch.
    pub count: usize,
    /// Source path of the file in flight.
    pub src: PathBuf,
    /// Destination path of the file in flight.
    pub dest: PathBuf,
    /// Bytes of the current file transferred so far.
    pub file_done: u64,
    /// Expected size of the current file.
    pub file_size: u64,
    /// Time spent on the current file.
    pub file_elapsed: Duration,
    /// Bytes transferred across the whole batch.
    pub total_done: u64,
    /// Expected size of the whole batch.
    pub total_size: u64,
    /// Time spent on the whole batch.
    pub total_elapsed: Duration,
}

impl Progress {
    /// Create a snapshot for a batch of `count` files totalling `total_size` bytes.
    #[must_use]
    pub fn new(count: usize, total_size: u64) -> Self {
        Self {
            count,
            total_size,
            ..Self::default()
        }
    }

    /// Switch the snapshot to a new file, resetting the per-file counters.
    pub fn start_file(&mut self, index: usize, src: &Path, dest: &Path, size: u64) {
        self.index = index;
        self.src = src.to_path_buf();
        self.dest = dest.to_path_buf();
        self.file_size = size;
        self.file_done = 0;
        self.file_elapsed = Duration::ZERO;
    }

    /// Account for `bytes` freshly transferred bytes.
    ///
    /// The contribution is clamped so that neither counter overshoots its
    /// expected size, which happens when a source grows mid-transfer.
    /// Returns the number of bytes actually accounted for.
    pub fn advance(&mut self, bytes: u64) -> u64 {
        let accepted = bytes.min(self.file_size.saturating_sub(self.file_done));
        self.file_done += accepted;
        self.total_done = (self.total_done + accepted).min(self.total_size);
        accepted
    }

    /// Record elapsed durations for the current file and the batch.
    pub const fn set_elapsed(&mut self, file_elapsed: Duration, total_elapsed: Duration) {
        self.file_elapsed = file_elapsed;
        self.total_elapsed = total_elapsed;
    }

    /// Source path of the file in flight, for display.
    #[must_use]
    pub fn src_display(&self) -> String {
        self.src.to_string_lossy().to_string()
    }

    /// Destination path of the file in flight, for display.
    #[must_use]
    pub fn dest_display(&self) -> String {
        self.dest.to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let mut progress = Progress::new(2, 300);
        progress.start_file(1, Path::new("a"), Path::new("b"), 100);

        assert_eq!(progress.advance(40), 40);
        assert_eq!(progress.advance(60), 60);
        assert_eq!(progress.file_done, 100);
        assert_eq!(progress.total_done, 100);
    }

    #[test]
    fn test_advance_clamps_growing_file() {
        let mut progress = Progress::new(1, 100);
        progress.start_file(1, Path::new("a"), Path::new("b"), 100);

        assert_eq!(progress.advance(80), 80);
        assert_eq!(progress.advance(80), 20);
        assert_eq!(progress.advance(10), 0);
        assert_eq!(progress.file_done, 100);
        assert_eq!(progress.total_done, 100);
    }

    #[test]
    fn test_start_file_resets_file_counters() {
        let mut progress = Progress::new(2, 300);
        progress.start_file(1, Path::new("a"), Path::new("b"), 100);
        progress.advance(100);
        progress.set_elapsed(Duration::from_secs(1), Duration::from_secs(1));

        progress.start_file(2, Path::new("c"), Path::new("d"), 200);

        assert_eq!(progress.index, 2);
        assert_eq!(progress.file_done, 0);
        assert_eq!(progress.file_size, 200);
        assert_eq!(progress.file_elapsed, Duration::ZERO);
        assert_eq!(progress.total_done, 100);
        assert_eq!(progress.total_elapsed, Duration::from_secs(1));
    }
}
