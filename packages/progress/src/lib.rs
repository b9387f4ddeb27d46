//! Progress rendering for pcp.
//!
//! This crate turns a [`Progress`] snapshot into terminal output:
//!
//! * [`Line`] composes one line of text out of [`Component`]s, exactly one of
//!   which is elastic and absorbs whatever width is left
//! * [`OneFileIndicator`] draws one progress line per transferred file
//! * [`GlobalIndicator`] draws a fixed two-line window for the whole batch
//!
//! # Example
//!
//! ```rust,ignore
//! use pcp_progress::{GlobalIndicator, IndicatorStyle, Progress, ProgressIndicator, TermWidth};
//!
//! let mut indicator = GlobalIndicator::new(std::io::stderr(), TermWidth::Detect, IndicatorStyle::from_env());
//! let progress = Progress::new(3, 4096);
//! indicator.on_start(&progress);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod component;
mod error;
mod indicator;
mod line;
mod progress;
mod text;

pub use component::{BarStyle, Component, LineProps, Markup, fraction};
pub use error::LineError;
pub use indicator::{
    GlobalIndicator, IndicatorStyle, OneFileIndicator, ProgressIndicator, TermWidth,
};
pub use line::Line;
pub use progress::Progress;
pub use text::{format_speed, format_time, shorten_path, shorten_string, transfer_description};
