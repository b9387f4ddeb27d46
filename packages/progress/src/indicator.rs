//! Progress indicators: one line per file, or one two-line window for the batch.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::Write;

use crate::component::{BarStyle, Component, LineProps, Markup};
use crate::line::Line;
use crate::progress::Progress;
use crate::text::transfer_description;

/// Width of the file name column in the global indicator.
const FILENAME_BUDGET: usize = 40;

/// Width used when the terminal size cannot be determined.
const FALLBACK_WIDTH: usize = 80;

/// Receives transfer events and draws them.
pub trait ProgressIndicator {
    /// Called once before the first file.
    fn on_start(&mut self, progress: &Progress);
    /// Called when a new file starts; `progress` already describes it.
    fn on_new_file(&mut self, progress: &Progress);
    /// Called with fresh counters while a file is transferring.
    fn on_progress(&mut self, progress: &Progress);
    /// Called once the current file is done, successfully or not.
    fn on_file_done(&mut self, progress: &Progress);
    /// Called once after the last file.
    fn on_finish(&mut self, progress: &Progress);
    /// Show a non-fatal problem without corrupting the drawn lines.
    fn on_warning(&mut self, progress: &Progress, message: &str);
}

/// Where the line width comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermWidth {
    /// Ask the terminal attached to stderr on every redraw.
    Detect,
    /// Always use this width.
    Fixed(usize),
}

impl TermWidth {
    /// Current width in columns.
    #[must_use]
    pub fn columns(self) -> usize {
        match self {
            Self::Detect => console::Term::stderr()
                .size_checked()
                .map_or(FALLBACK_WIDTH, |(_, columns)| usize::from(columns)),
            Self::Fixed(width) => width,
        }
    }
}

/// Cosmetic settings shared by both indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorStyle {
    /// Emit color escape sequences.
    pub colors: bool,
    /// Draw the pac-man bar.
    pub candy: bool,
}

impl IndicatorStyle {
    /// Colors when stderr supports them, candy when `PCP_PACMAN` is set.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            colors: console::colors_enabled_stderr(),
            candy: std::env::var_os("PCP_PACMAN").is_some(),
        }
    }

    /// No colors, plain bar.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            colors: false,
            candy: false,
        }
    }

    const fn bar(self) -> Component {
        if self.candy {
            Component::Bar(BarStyle::Candy)
        } else {
            Component::Bar(BarStyle::Plain)
        }
    }
}

fn warning_text(message: &str, colors: bool) -> String {
    if colors {
        format!(
            "{}{}Warning:{} {message}",
            Markup::Bold.code(),
            Markup::Brown.code(),
            Markup::Reset.code()
        )
    } else {
        format!("Warning: {message}")
    }
}

fn build_line(components: Vec<Component>, style: IndicatorStyle) -> Line {
    Line::new(components)
        .expect("Invalid progress line")
        .with_colors(style.colors)
}

fn file_props<'a>(progress: &Progress, filename: &'a str) -> LineProps<'a> {
    LineProps {
        index: progress.index,
        count: progress.count,
        current_value: progress.file_done,
        max_value: progress.file_size,
        elapsed: progress.file_elapsed,
        filename,
    }
}

fn total_props(progress: &Progress) -> LineProps<'static> {
    LineProps {
        index: progress.index,
        count: progress.count,
        current_value: progress.total_done,
        max_value: progress.total_size,
        elapsed: progress.total_elapsed,
        filename: "",
    }
}

/// Shows a header and one live line for the file in flight.
///
/// ```text
/// /path/to/{foo => bar}
/// [2/3]  42% [#########            ] - 123.45 M/s | ETA  : 00:00:03
/// ```
pub struct OneFileIndicator<W: Write> {
    out: W,
    width: TermWidth,
    line: Line,
    colors: bool,
    line_open: bool,
}

impl<W: Write> OneFileIndicator<W> {
    /// Create an indicator drawing on `out`.
    #[must_use]
    pub fn new(out: W, width: TermWidth, style: IndicatorStyle) -> Self {
        let line = build_line(
            vec![
                Component::Markup(Markup::Blue),
                Component::Counter,
                Component::Markup(Markup::Reset),
                Component::text(" "),
                Component::Markup(Markup::Bold),
                Component::Percent,
                Component::Markup(Markup::Reset),
                Component::text(" "),
                Component::Markup(Markup::LightGray),
                style.bar(),
                Component::Markup(Markup::Reset),
                Component::text(" - "),
                Component::Markup(Markup::Standout),
                Component::Speed,
                Component::Markup(Markup::Reset),
                Component::text(" | "),
                Component::Markup(Markup::Brown),
                Component::Eta,
                Component::Markup(Markup::Reset),
            ],
            style,
        );
        Self {
            out,
            width,
            line,
            colors: style.colors,
            line_open: false,
        }
    }

    /// Consume the indicator, returning its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, progress: &Progress) {
        let filename = progress.src_display();
        let text = self
            .line
            .render(&file_props(progress, &filename), self.width.columns());
        let _ = write!(self.out, "\r{text}");
        let _ = self.out.flush();
        self.line_open = true;
    }
}

impl<W: Write> ProgressIndicator for OneFileIndicator<W> {
    fn on_start(&mut self, _progress: &Progress) {}

    fn on_new_file(&mut self, progress: &Progress) {
        let header = transfer_description(&progress.src_display(), &progress.dest_display());
        let _ = writeln!(self.out, "{header}");
        self.draw(progress);
    }

    fn on_progress(&mut self, progress: &Progress) {
        self.draw(progress);
    }

    fn on_file_done(&mut self, _progress: &Progress) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
        self.line_open = false;
    }

    fn on_finish(&mut self, _progress: &Progress) {}

    fn on_warning(&mut self, _progress: &Progress, message: &str) {
        if self.line_open {
            let _ = writeln!(self.out);
            self.line_open = false;
        }
        let _ = writeln!(self.out, "{}", warning_text(message, self.colors));
        let _ = self.out.flush();
    }
}

/// Shows a fixed two-line window: the whole batch, then the file in flight.
///
/// ```text
///  42% -  98.10 M/s - [#########            ] - [2/3] ETA  : 00:00:10
///  61% s/foo.txt      [############         ] ETA  : 00:00:01
/// ```
///
/// Both lines are redrawn together after moving the cursor back up, so the
/// number of lines never changes for the lifetime of the indicator.
pub struct GlobalIndicator<W: Write> {
    out: W,
    width: TermWidth,
    lines: [Line; 2],
    colors: bool,
}

impl<W: Write> GlobalIndicator<W> {
    /// Create an indicator drawing on `out`.
    #[must_use]
    pub fn new(out: W, width: TermWidth, style: IndicatorStyle) -> Self {
        let total_line = build_line(
            vec![
                Component::Markup(Markup::Bold),
                Component::Percent,
                Component::Markup(Markup::Reset),
                Component::text(" - "),
                Component::Markup(Markup::Standout),
                Component::Speed,
                Component::Markup(Markup::Reset),
                Component::text(" - "),
                Component::Markup(Markup::LightGray),
                style.bar(),
                Component::Markup(Markup::Reset),
                Component::text(" - "),
                Component::Markup(Markup::Blue),
                Component::Counter,
                Component::Markup(Markup::Reset),
                Component::text(" "),
                Component::Markup(Markup::Brown),
                Component::Eta,
                Component::Markup(Markup::Reset),
            ],
            style,
        );
        let file_line = build_line(
            vec![
                Component::Markup(Markup::Bold),
                Component::Percent,
                Component::Markup(Markup::Reset),
                Component::text(" "),
                Component::FileName {
                    budget: FILENAME_BUDGET,
                },
                Component::text(" "),
                Component::Markup(Markup::LightGray),
                style.bar(),
                Component::Markup(Markup::Reset),
                Component::text(" "),
                Component::Markup(Markup::Brown),
                Component::Eta,
                Component::Markup(Markup::Reset),
            ],
            style,
        );
        Self {
            out,
            width,
            lines: [total_line, file_line],
            colors: style.colors,
        }
    }

    /// Consume the indicator, returning its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, progress: &Progress) {
        let width = self.width.columns();
        let filename = progress.src_display();
        let [total_line, file_line] = &self.lines;
        let total = total_line.render(&total_props(progress), width);
        let file = file_line.render(&file_props(progress, &filename), width);

        let _ = write!(self.out, "\x1b[{}A", self.lines.len());
        let _ = write!(self.out, "\r{total}\n\r{file}\n");
        let _ = self.out.flush();
    }
}

impl<W: Write> ProgressIndicator for GlobalIndicator<W> {
    fn on_start(&mut self, progress: &Progress) {
        log::debug!(
            "Starting global progress for {} files, {} bytes",
            progress.count,
            progress.total_size
        );
        let _ = write!(self.out, "{}", "\n".repeat(self.lines.len()));
        self.draw(progress);
    }

    fn on_new_file(&mut self, progress: &Progress) {
        self.draw(progress);
    }

    fn on_progress(&mut self, progress: &Progress) {
        self.draw(progress);
    }

    fn on_file_done(&mut self, _progress: &Progress) {}

    fn on_finish(&mut self, _progress: &Progress) {}

    fn on_warning(&mut self, progress: &Progress, message: &str) {
        // Print over the window, then open a fresh window below the message
        let count = self.lines.len();
        let _ = write!(self.out, "\x1b[{count}A\r\x1b[J");
        let _ = writeln!(self.out, "{}", warning_text(message, self.colors));
        let _ = write!(self.out, "{}", "\n".repeat(count));
        self.draw(progress);
    }
}
