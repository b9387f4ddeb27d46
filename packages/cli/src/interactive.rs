//! Interactive prompts using dialoguer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use console::Term;
use dialoguer::Input;
use pcp_transfer::OverwritePrompt;

/// Asks on the terminal before an existing file is overwritten.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl OverwritePrompt for TerminalPrompt {
    fn confirm_overwrite(&mut self, destination: &Path) -> bool {
        // The progress line of the current file has no newline yet
        eprintln!();

        match prompt_overwrite(destination) {
            Ok(answer) => is_yes(&answer),
            Err(e) => {
                log::warn!("Could not read answer, skipping {}: {e}", destination.display());
                false
            }
        }
    }
}

/// Prompt for permission to overwrite `destination`.
///
/// # Errors
///
/// * If the user cancels the input
fn prompt_overwrite(destination: &Path) -> io::Result<String> {
    let question = format!(
        "File '{}' already exists. Overwrite? (y/N)",
        destination.display()
    );

    // dialoguer refuses to run without a terminal, so piped answers are read line by line
    if !io::stdin().is_terminal() || !Term::stderr().is_term() {
        let mut stderr = io::stderr();
        write!(stderr, "{question} ")?;
        stderr.flush()?;
        return read_answer(io::stdin().lock());
    }

    let answer: String = Input::new()
        .with_prompt(question)
        .allow_empty(true)
        .interact_text()?;

    Ok(answer)
}

/// Read one answer line, without its line ending.
///
/// # Errors
///
/// * If reading fails or the input is already at end of file
fn read_answer<R: BufRead>(mut reader: R) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no answer on standard input",
        ));
    }

    let answer = line.trim_end_matches(['\n', '\r']);
    Ok(answer.to_string())
}

/// Only a literal `y` overwrites.
fn is_yes(answer: &str) -> bool {
    answer == "y"
}
