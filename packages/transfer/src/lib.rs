//! File transfer engine for pcp.
//!
//! This crate copies or moves files and directory trees while reporting
//! byte-level progress:
//!
//! * [`build_plan`] walks the sources, creates destination directories and
//!   produces a flat, ordered list of [`WorkItem`]s
//! * [`transfer_file`] streams one file in fixed-size chunks (or recreates one
//!   symlink), invoking a callback per chunk
//! * [`TransferManager`] drives a whole batch, throttles redraws of a
//!   [`pcp_progress::ProgressIndicator`] and collects per-file errors
//!
//! Everything runs on the calling thread; the only suspension points are the
//! chunk reads and writes, which is also where an [`Interrupt`] is observed.
//!
//! # Example
//!
//! ```rust,ignore
//! use pcp_transfer::{TransferManager, TransferOptions};
//!
//! let mut prompt = |_: &Path| false;
//! let mut manager = TransferManager::new(TransferOptions::default(), &mut indicator, &mut prompt);
//! let errors = manager.run(&sources, &destination)?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod copy;
mod error;
mod interrupt;
mod manager;
mod options;
mod plan;
mod prompt;

pub use copy::{BUFFER_SIZE, TransferOutcome, TransferReport, transfer_file};
pub use error::{PlanError, RunError, TransferError};
pub use interrupt::Interrupt;
pub use manager::{DEFAULT_THROTTLE, TransferErrors, TransferManager};
pub use options::TransferOptions;
pub use plan::{TransferPlan, WorkItem, build_plan};
pub use prompt::OverwritePrompt;
