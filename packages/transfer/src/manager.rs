//! Transfer orchestration: plan, copy each item, throttle progress events, collect errors.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use pcp_progress::{Progress, ProgressIndicator};

use crate::copy::{TransferOutcome, transfer_file};
use crate::error::{RunError, TransferError};
use crate::interrupt::Interrupt;
use crate::options::TransferOptions;
use crate::plan::{TransferPlan, build_plan};
use crate::prompt::OverwritePrompt;

/// Minimum interval between two forwarded progress updates.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

/// Failed sources and why they failed, in path order.
pub type TransferErrors = BTreeMap<PathBuf, TransferError>;

/// Drives a whole transfer run.
///
/// Owns the [`Progress`] snapshot for the duration of a run and is the only
/// thing that mutates it.
pub struct TransferManager<'a> {
    options: TransferOptions,
    indicator: &'a mut dyn ProgressIndicator,
    prompt: &'a mut dyn OverwritePrompt,
    interrupt: Interrupt,
    throttle: Duration,
}

impl<'a> TransferManager<'a> {
    /// Create a manager drawing on `indicator` and asking `prompt` before overwriting.
    pub fn new(
        options: TransferOptions,
        indicator: &'a mut dyn ProgressIndicator,
        prompt: &'a mut dyn OverwritePrompt,
    ) -> Self {
        Self {
            options,
            indicator,
            prompt,
            interrupt: Interrupt::new(),
            throttle: DEFAULT_THROTTLE,
        }
    }

    /// Observe `interrupt` between chunks and between files.
    #[must_use]
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Forward at most one progress update per `throttle`.
    #[must_use]
    pub const fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Plan and execute a transfer of `sources` to `destination`.
    ///
    /// # Errors
    ///
    /// * If planning fails
    /// * If a file fails and errors are not ignored
    /// * If the run is interrupted
    pub fn run(
        &mut self,
        sources: &[PathBuf],
        destination: &Path,
    ) -> Result<TransferErrors, RunError> {
        let plan = build_plan(sources, destination, self.options.all_files)?;
        Ok(self.execute(&plan)?)
    }

    /// Execute an already built plan.
    ///
    /// Returns the per-file errors collected while `ignore_errors` is set;
    /// the map is always empty otherwise.
    ///
    /// # Errors
    ///
    /// * If a file fails and errors are not ignored
    /// * If the run is interrupted
    pub fn execute(&mut self, plan: &TransferPlan) -> Result<TransferErrors, TransferError> {
        let mut errors = TransferErrors::new();
        let mut progress = Progress::new(plan.items.len(), plan.total_size);
        let mut throttle = Throttle::new(self.throttle);
        let started = Instant::now();

        self.indicator.on_start(&progress);

        for (position, item) in plan.items.iter().enumerate() {
            self.interrupt.check()?;

            progress.start_file(position + 1, &item.source, &item.destination, item.size);
            progress.set_elapsed(Duration::ZERO, started.elapsed());
            self.indicator.on_new_file(&progress);

            let file_started = Instant::now();
            let result = {
                let indicator = &mut *self.indicator;
                let progress = &mut progress;
                let throttle = &mut throttle;
                transfer_file(
                    item,
                    &self.options,
                    &mut *self.prompt,
                    &self.interrupt,
                    |bytes| {
                        progress.advance(bytes);
                        progress.set_elapsed(file_started.elapsed(), started.elapsed());
                        if throttle.ready() {
                            indicator.on_progress(progress);
                        }
                    },
                )
            };

            if throttle.take_pending() {
                self.indicator.on_progress(&progress);
            }
            self.indicator.on_file_done(&progress);

            match result {
                Ok(report) => {
                    if report.outcome == TransferOutcome::Skipped {
                        log::debug!("Skipped {}", item.source.display());
                    } else {
                        log::debug!("Done {}: {:?}", item.source.display(), report.outcome);
                    }
                    for warning in &report.warnings {
                        self.indicator.on_warning(&progress, warning);
                    }
                }
                Err(TransferError::Interrupted) => return Err(TransferError::Interrupted),
                Err(error) if self.options.ignore_errors => {
                    log::debug!("Ignoring error on {}: {error}", item.source.display());
                    if matches!(error, TransferError::Io { .. }) && !self.options.move_files {
                        if let Err(warning) = remove_partial(&item.destination) {
                            self.indicator.on_warning(&progress, &warning);
                        }
                    }
                    errors.insert(item.source.clone(), error);
                }
                Err(error) => return Err(error),
            }
        }

        progress.set_elapsed(progress.file_elapsed, started.elapsed());
        self.indicator.on_finish(&progress);

        if self.options.move_files && (errors.is_empty() || self.options.ignore_errors) {
            for warning in remove_directories(&plan.directories_to_remove) {
                self.indicator.on_warning(&progress, &warning);
            }
        }

        Ok(errors)
    }
}

/// Time-based rate limiter remembering whether an update was suppressed.
struct Throttle {
    interval: Duration,
    last: Option<Instant>,
    pending: bool,
}

impl Throttle {
    const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            pending: false,
        }
    }

    fn ready(&mut self) -> bool {
        let now = Instant::now();
        let due = self
            .last
            .is_none_or(|last| now.duration_since(last) >= self.interval);

        if due {
            self.last = Some(now);
            self.pending = false;
        } else {
            self.pending = true;
        }

        due
    }

    const fn take_pending(&mut self) -> bool {
        let pending = self.pending;
        self.pending = false;
        pending
    }
}

fn remove_partial(destination: &Path) -> Result<(), String> {
    log::debug!("Removing partial file {}", destination.display());
    match fs::remove_file(destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("Could not remove {}: {e}", destination.display())),
    }
}

/// Remove emptied source directories, returning a warning for each one left behind.
fn remove_directories(directories: &[PathBuf]) -> Vec<String> {
    directories
        .iter()
        .filter_map(|directory| {
            log::debug!("Removing directory {}", directory.display());
            fs::remove_dir(directory)
                .err()
                .map(|e| format!("Could not remove directory {}: {e}", directory.display()))
        })
        .collect()
}
