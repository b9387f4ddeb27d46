//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use colored::Colorize;
use pcp_transfer::TransferErrors;

/// Print the version line.
pub fn print_version(program: &str) {
    println!("{program} version {}", env!("CARGO_PKG_VERSION"));
}

/// List every file that failed, one per line.
pub fn print_error_summary(errors: &TransferErrors) {
    println!(
        "{}",
        "Error occurred when transferring the following files:".bold()
    );
    for (path, error) in errors {
        println!("{} {}", path.display().to_string().red(), error);
    }
}

/// Print the interrupt notice.
pub fn print_interrupted() {
    eprintln!("\n{}", "Interrupted by user".red().bold());
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
