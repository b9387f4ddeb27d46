//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::struct_excessive_bools)]

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use pcp_config::Config;
use pcp_transfer::TransferOptions;

/// Which tool we were started as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    /// `pcp`: copy sources.
    Copy,
    /// `pmv`: move sources.
    Move,
}

impl Program {
    /// Pick the program from the name the binary was invoked with.
    #[must_use]
    pub fn from_invocation(argv0: Option<&OsStr>) -> Self {
        let name = argv0
            .and_then(|arg| Path::new(arg).file_stem())
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        if name.ends_with("pmv") {
            Self::Move
        } else {
            Self::Copy
        }
    }

    /// Program name as shown to the user.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Copy => "pcp",
            Self::Move => "pmv",
        }
    }

    const fn about(self) -> &'static str {
        match self {
            Self::Copy => "Copy SOURCE to DESTINATION, or several SOURCEs to DIRECTORY",
            Self::Move => "Move SOURCE to DESTINATION, or several SOURCEs to DIRECTORY",
        }
    }

    const fn usage(self) -> &'static str {
        match self {
            Self::Copy => "pcp [OPTIONS] SOURCE DESTINATION\n       pcp [OPTIONS] SOURCE... DIRECTORY",
            Self::Move => "pmv [OPTIONS] SOURCE DESTINATION\n       pmv [OPTIONS] SOURCE... DIRECTORY",
        }
    }

    fn command(self) -> clap::Command {
        Args::command()
            .name(self.name())
            .bin_name(self.name())
            .about(self.about())
            .override_usage(self.usage())
    }
}

/// CLI arguments shared by pcp and pmv.
#[derive(Debug, Parser)]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Sources followed by the destination.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Ask before overwriting existing files.
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Never overwrite existing files.
    #[arg(short = 's', long, overrides_with = "force")]
    pub safe: bool,

    /// Silently overwrite existing files (this is the default).
    #[arg(short = 'f', long, overrides_with = "safe")]
    pub force: bool,

    /// Transfer all files, including hidden ones.
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Preserve time stamps and ownership.
    #[arg(short = 'p', long)]
    pub preserve: bool,

    /// Keep going when a file fails and list failures at the end.
    #[arg(long = "ignore-errors")]
    pub ignore_errors: bool,

    /// Display only one progress window for the whole transfer.
    #[arg(short = 'g', long = "global-pbar")]
    pub global_pbar: bool,

    /// Print version information.
    #[arg(short = 'v', long)]
    pub version: bool,

    #[arg(long = "i-love-candy", hide = true)]
    pub candy: bool,

    #[arg(long, hide = true)]
    pub debug: bool,
}

impl Args {
    /// Parse the process arguments for `program`, exiting on error.
    #[must_use]
    pub fn parse_for(program: Program) -> Self {
        Self::try_parse_for(program, std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse `args` for `program`.
    ///
    /// # Errors
    ///
    /// * If the arguments are invalid
    pub fn try_parse_for<I, T>(program: Program, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut command = program.command();
        let matches = command.try_get_matches_from_mut(args)?;
        let parsed = Self::from_arg_matches(&matches)?;

        if !parsed.version && parsed.paths.len() < 2 {
            return Err(command.error(ErrorKind::TooFewValues, "Incorrect number of arguments"));
        }

        Ok(parsed)
    }

    /// Every path but the last.
    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        match self.paths.split_last() {
            Some((_, sources)) => sources,
            None => &[],
        }
    }

    /// The last path.
    #[must_use]
    pub fn destination(&self) -> Option<&Path> {
        self.paths.last().map(PathBuf::as_path)
    }

    /// Merge flags over the configuration file.
    #[must_use]
    pub const fn transfer_options(&self, program: Program, config: &Config) -> TransferOptions {
        TransferOptions {
            move_files: matches!(program, Program::Move),
            preserve: self.preserve || config.preserve,
            safe: self.safe || (config.safe && !self.force),
            interactive: self.interactive,
            ignore_errors: self.ignore_errors || config.ignore_errors,
            global_progress: self.global_pbar || config.global_progress,
            all_files: self.all || config.all_files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_from_invocation() {
        assert_eq!(
            Program::from_invocation(Some(OsStr::new("/usr/bin/pmv"))),
            Program::Move
        );
        assert_eq!(
            Program::from_invocation(Some(OsStr::new("pcp"))),
            Program::Copy
        );
        assert_eq!(Program::from_invocation(None), Program::Copy);
    }

    #[test]
    fn test_sources_and_destination() {
        let args = Args::try_parse_for(Program::Copy, ["pcp", "a", "b", "dir"]).unwrap();

        assert_eq!(args.sources(), &[PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(args.destination(), Some(Path::new("dir")));
    }

    #[test]
    fn test_too_few_paths() {
        let result = Args::try_parse_for(Program::Copy, ["pcp", "a"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_version_needs_no_paths() {
        let args = Args::try_parse_for(Program::Move, ["pmv", "-v"]).unwrap();

        assert!(args.version);
    }

    #[test]
    fn test_last_of_safe_and_force_wins() {
        let config = Config::default();

        let args = Args::try_parse_for(Program::Copy, ["pcp", "-f", "-s", "a", "b"]).unwrap();
        assert!(args.transfer_options(Program::Copy, &config).safe);

        let args = Args::try_parse_for(Program::Copy, ["pcp", "-s", "-f", "a", "b"]).unwrap();
        assert!(!args.transfer_options(Program::Copy, &config).safe);
    }

    #[test]
    fn test_force_overrides_config() {
        let config = Config {
            safe: true,
            global_progress: true,
            ..Config::default()
        };

        let args = Args::try_parse_for(Program::Copy, ["pcp", "a", "b"]).unwrap();
        let options = args.transfer_options(Program::Copy, &config);
        assert!(options.safe);
        assert!(options.global_progress);

        let args = Args::try_parse_for(Program::Copy, ["pcp", "--force", "a", "b"]).unwrap();
        assert!(!args.transfer_options(Program::Copy, &config).safe);
    }

    #[test]
    fn test_move_program_sets_move() {
        let args = Args::try_parse_for(Program::Move, ["pmv", "-g", "a", "b"]).unwrap();
        let options = args.transfer_options(Program::Move, &Config::default());

        assert!(options.move_files);
        assert!(options.global_progress);
    }
}
