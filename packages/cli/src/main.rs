//! pcp / pmv CLI entry point.
//!
//! Copies (or, when invoked as `pmv`, moves) files and directories while
//! drawing live progress on stderr.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod interactive;
mod output;
mod signal;

use std::env;
use std::io;

use args::{Args, Program};
use interactive::TerminalPrompt;
use pcp_config::load_config;
use pcp_progress::{
    GlobalIndicator, IndicatorStyle, OneFileIndicator, ProgressIndicator, TermWidth,
};
use pcp_transfer::{Interrupt, RunError, TransferManager};

/// Exit status after Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    let program = Program::from_invocation(env::args_os().next().as_deref());
    let args = Args::parse_for(program);

    if args.version {
        output::print_version(program.name());
        return;
    }

    init_logging(args.debug);

    match run(program, &args) {
        Ok(()) => {}
        Err(e) => {
            let interrupted = e
                .downcast_ref::<RunError>()
                .is_some_and(RunError::is_interrupted);
            if interrupted {
                output::print_interrupted();
                std::process::exit(EXIT_INTERRUPTED);
            }
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

fn init_logging(debug: bool) {
    if debug || env::var_os("PCP_DEBUG").is_some() {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    } else if env::var_os("RUST_LOG").is_none() {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "warn");
        }
    }
    pretty_env_logger::init();
}

/// Main application logic.
///
/// Files that failed while errors were ignored are listed but do not fail the run.
fn run(program: Program, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let options = args.transfer_options(program, &config);
    log::debug!("{} with {options:?}", program.name());

    let destination = args
        .destination()
        .ok_or("Incorrect number of arguments")?;

    let env_style = IndicatorStyle::from_env();
    let style = IndicatorStyle {
        candy: args.candy || config.candy || env_style.candy,
        ..env_style
    };

    let mut indicator: Box<dyn ProgressIndicator> = if options.global_progress {
        Box::new(GlobalIndicator::new(io::stderr(), TermWidth::Detect, style))
    } else {
        Box::new(OneFileIndicator::new(io::stderr(), TermWidth::Detect, style))
    };

    let interrupt = Interrupt::new();
    if let Err(e) = signal::install(&interrupt) {
        output::print_warning(&format!("Could not install Ctrl-C handler: {e}"));
    }

    let mut prompt = TerminalPrompt;
    let errors = TransferManager::new(options, indicator.as_mut(), &mut prompt)
        .with_interrupt(interrupt)
        .run(args.sources(), destination)?;

    if !errors.is_empty() {
        output::print_error_summary(&errors);
    }

    Ok(())
}
