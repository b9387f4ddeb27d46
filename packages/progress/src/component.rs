//! Line components.
//!
//! A component is a pure function of [`LineProps`]: the same component is
//! re-rendered many times per second with fresh props. Only the bar is
//! elastic, every other component has a width determined by its content.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::time::Duration;

use console::Alignment;

use crate::text::{format_speed, format_time, shorten_path};

/// Values a line is rendered from.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineProps<'a> {
    /// 1-based ordinal of the current file.
    pub index: usize,
    /// Number of files in the batch.
    pub count: usize,
    /// Bytes done.
    pub current_value: u64,
    /// Bytes expected.
    pub max_value: u64,
    /// Time spent so far.
    pub elapsed: Duration,
    /// Name of the file in flight.
    pub filename: &'a str,
}

impl LineProps<'_> {
    /// Completed fraction of `current_value` over `max_value`, see [`fraction`].
    #[must_use]
    pub fn fraction(&self) -> f64 {
        fraction(self.current_value, self.max_value)
    }
}

/// Completed fraction in `[0, 1]`.
///
/// `0 / 0` counts as complete so that empty files and symlinks show 100%.
/// A zero maximum with a non-zero current value counts as nothing done.
#[must_use]
pub fn fraction(current: u64, max: u64) -> f64 {
    if current == 0 && max == 0 {
        return 1.0;
    }
    if max == 0 || current == 0 {
        return 0.0;
    }
    if current >= max {
        return 1.0;
    }
    current as f64 / max as f64
}

/// Zero-width style tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Bright blue foreground.
    Blue,
    /// Bold.
    Bold,
    /// Brown (dim yellow) foreground.
    Brown,
    /// Light gray foreground.
    LightGray,
    /// Reverse video.
    Standout,
    /// Reset all attributes.
    Reset,
}

impl Markup {
    /// ANSI escape sequence for this token.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Blue => "\x1b[34;1m",
            Self::Bold => "\x1b[1m",
            Self::Brown => "\x1b[33m",
            Self::LightGray => "\x1b[37m",
            Self::Standout => "\x1b[7m",
            Self::Reset => "\x1b[0m",
        }
    }
}

/// Look of the progress bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BarStyle {
    /// `[#####     ]`
    #[default]
    Plain,
    /// `[-----C o  o ]`
    Candy,
}

/// One piece of a [`crate::Line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Literal text.
    Text(String),
    /// Style token, renders with zero visible width.
    Markup(Markup),
    /// `[ 4/10]`
    Counter,
    /// ` 42%`
    Percent,
    /// `  1.50 M/s`
    Speed,
    /// `ETA  : 00:01:12`, then `Time : 00:02:03` once complete.
    Eta,
    /// The current file name shortened to a fixed character budget.
    FileName {
        /// Width the name is shortened and padded to.
        budget: usize,
    },
    /// Elastic bar filling the leftover width.
    Bar(BarStyle),
}

impl Component {
    /// Convenience constructor for [`Component::Text`].
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }

    /// Whether this component absorbs the leftover width of its line.
    #[must_use]
    pub const fn is_elastic(&self) -> bool {
        matches!(self, Self::Bar(_))
    }

    /// Render this component.
    ///
    /// `width` is only meaningful for elastic components, which must return
    /// exactly `width` visible characters. `colors` disables every escape
    /// sequence when false.
    #[must_use]
    pub fn render(&self, props: &LineProps<'_>, width: usize, colors: bool) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Markup(markup) => {
                if colors {
                    markup.code().to_string()
                } else {
                    String::new()
                }
            }
            Self::Counter => render_counter(props),
            Self::Percent => format!("{:>3}%", (props.fraction() * 100.0) as u32),
            Self::Speed => render_speed(props),
            Self::Eta => render_eta(props),
            Self::FileName { budget } => {
                let short = shorten_path(props.filename, *budget);
                console::pad_str(&short, *budget, Alignment::Left, None).into_owned()
            }
            Self::Bar(style) => render_bar(*style, props.fraction(), width, colors),
        }
    }
}

fn render_counter(props: &LineProps<'_>) -> String {
    let digits = props.count.to_string().len();
    format!("[{:>digits$}/{}]", props.index, props.count)
}

fn render_speed(props: &LineProps<'_>) -> String {
    let elapsed = props.elapsed.as_secs_f64();
    let bytes_per_second = if elapsed < 2e-6 {
        0.0
    } else {
        props.current_value as f64 / elapsed
    };
    format_speed(bytes_per_second)
}

fn render_eta(props: &LineProps<'_>) -> String {
    let fraction = props.fraction();
    if fraction <= 0.0 {
        return "ETA  : --:--:--".to_string();
    }
    if fraction >= 1.0 {
        return format!("Time : {}", format_time(props.elapsed));
    }
    let elapsed = props.elapsed.as_secs_f64();
    let eta = elapsed / fraction - elapsed;
    format!("ETA  : {}", format_time(Duration::from_secs_f64(eta.max(0.0))))
}

fn render_bar(style: BarStyle, fraction: f64, width: usize, colors: bool) -> String {
    if width < 2 {
        return " ".repeat(width);
    }

    let inner = width - 2;
    let marked = ((fraction * inner as f64) as usize).min(inner);

    let body = match style {
        BarStyle::Plain => format!("{}{}", "#".repeat(marked), " ".repeat(inner - marked)),
        BarStyle::Candy => render_candy(marked, inner, colors),
    };
    format!("[{body}]")
}

fn render_candy(marked: usize, inner: usize, colors: bool) -> String {
    let eaten = "-".repeat(marked);
    if marked == inner {
        return eaten;
    }

    let mouth = if marked % 2 == 1 { 'c' } else { 'C' };
    let dots: String = " o "
        .repeat(1 + inner / 3)
        .chars()
        .skip(marked + 1)
        .take(inner - marked - 1)
        .collect();

    if colors {
        format!("{eaten}\x1b[1;33m{mouth}\x1b[m\x1b[0;37m{dots}\x1b[m")
    } else {
        format!("{eaten}{mouth}{dots}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(current_value: u64, max_value: u64, elapsed: u64) -> LineProps<'static> {
        LineProps {
            index: 2,
            count: 10,
            current_value,
            max_value,
            elapsed: Duration::from_secs(elapsed),
            filename: "src/foo.txt",
        }
    }

    #[test]
    fn test_fraction_conventions() {
        assert!((fraction(0, 0) - 1.0).abs() < f64::EPSILON);
        assert!(fraction(5, 0).abs() < f64::EPSILON);
        assert!(fraction(0, 5).abs() < f64::EPSILON);
        assert!((fraction(10, 5) - 1.0).abs() < f64::EPSILON);
        assert!((fraction(1, 4) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_counter_pads_index() {
        assert_eq!(Component::Counter.render(&props(0, 1, 0), 0, false), "[ 2/10]");
    }

    #[test]
    fn test_percent() {
        assert_eq!(Component::Percent.render(&props(1, 4, 0), 0, false), " 25%");
        assert_eq!(Component::Percent.render(&props(0, 0, 0), 0, false), "100%");
    }

    #[test]
    fn test_speed() {
        assert_eq!(Component::Speed.render(&props(3000, 6000, 2), 0, false), "  1.50 K/s");
        assert_eq!(Component::Speed.render(&props(3000, 6000, 0), 0, false), "  0.00 B/s");
    }

    #[test]
    fn test_eta() {
        assert_eq!(Component::Eta.render(&props(0, 100, 3), 0, false), "ETA  : --:--:--");
        assert_eq!(Component::Eta.render(&props(25, 100, 10), 0, false), "ETA  : 00:00:30");
        assert_eq!(Component::Eta.render(&props(100, 100, 65), 0, false), "Time : 00:01:05");
    }

    #[test]
    fn test_bar() {
        let bar = Component::Bar(BarStyle::Plain);
        assert_eq!(bar.render(&props(1, 2, 0), 12, false), "[#####     ]");
        assert_eq!(bar.render(&props(0, 0, 0), 6, false), "[####]");
        assert_eq!(bar.render(&props(3, 0, 0), 6, false), "[    ]");
        assert_eq!(bar.render(&props(1, 2, 0), 1, false), " ");
    }

    #[test]
    fn test_candy_bar_keeps_width() {
        let bar = Component::Bar(BarStyle::Candy);
        for current in 0..=20 {
            let out = bar.render(&props(current, 20, 0), 30, true);
            assert_eq!(console::measure_text_width(&out), 30, "{out:?}");
        }
    }

    #[test]
    fn test_markup_without_colors() {
        let bold = Component::Markup(Markup::Bold);
        assert_eq!(bold.render(&props(0, 0, 0), 0, false), "");
        assert_eq!(bold.render(&props(0, 0, 0), 0, true), "\x1b[1m");
    }

    #[test]
    fn test_file_name_fills_budget() {
        let name = Component::FileName { budget: 8 };
        assert_eq!(name.render(&props(0, 0, 0), 0, false), "s/foo...");
        let name = Component::FileName { budget: 14 };
        assert_eq!(name.render(&props(0, 0, 0), 0, false), "src/foo.txt   ");
    }
}
