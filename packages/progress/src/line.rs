//! Lines composed of components.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use console::Alignment;

use crate::component::{Component, LineProps};
use crate::error::LineError;

/// An ordered list of components rendered to exactly the terminal width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    components: Vec<Component>,
    elastic: usize,
    colors: bool,
}

impl Line {
    /// Build a line.
    ///
    /// # Errors
    ///
    /// * If `components` does not contain exactly one elastic component
    pub fn new(components: Vec<Component>) -> Result<Self, LineError> {
        let elastic: Vec<usize> = components
            .iter()
            .enumerate()
            .filter(|(_, component)| component.is_elastic())
            .map(|(i, _)| i)
            .collect();

        match elastic.as_slice() {
            [] => Err(LineError::NoElasticComponent),
            [index] => Ok(Self {
                elastic: *index,
                components,
                colors: true,
            }),
            _ => Err(LineError::TooManyElasticComponents {
                count: elastic.len(),
            }),
        }
    }

    /// Enable or disable escape sequences in the rendered output.
    #[must_use]
    pub const fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Render the line so that its visible width is exactly `width`.
    ///
    /// Fixed components are rendered first; the elastic component then gets
    /// whatever is left. If the fixed components alone overflow `width`, the
    /// result is truncated.
    #[must_use]
    pub fn render(&self, props: &LineProps<'_>, width: usize) -> String {
        let mut rendered: Vec<String> = Vec::with_capacity(self.components.len());
        let mut used = 0;

        for component in &self.components {
            if component.is_elastic() {
                rendered.push(String::new());
                continue;
            }
            let text = component.render(props, 0, self.colors);
            used += console::measure_text_width(&text);
            rendered.push(text);
        }

        let elastic_width = width.saturating_sub(used);
        rendered[self.elastic] =
            self.components[self.elastic].render(props, elastic_width, self.colors);

        let line = rendered.concat();
        console::pad_str(&line, width, Alignment::Left, Some("")).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::component::{BarStyle, Markup};

    fn props() -> LineProps<'static> {
        LineProps {
            index: 1,
            count: 3,
            current_value: 20,
            max_value: 100,
            elapsed: Duration::from_secs(10),
            filename: "some/dir/file.txt",
        }
    }

    fn full_line() -> Line {
        Line::new(vec![
            Component::Markup(Markup::Blue),
            Component::Counter,
            Component::Markup(Markup::Reset),
            Component::text(" "),
            Component::Markup(Markup::Bold),
            Component::Percent,
            Component::Markup(Markup::Reset),
            Component::text(" "),
            Component::Markup(Markup::LightGray),
            Component::Bar(BarStyle::Plain),
            Component::Markup(Markup::Reset),
            Component::text(" - "),
            Component::Markup(Markup::Standout),
            Component::Speed,
            Component::Markup(Markup::Reset),
            Component::text(" | "),
            Component::Markup(Markup::Brown),
            Component::Eta,
            Component::Markup(Markup::Reset),
        ])
        .unwrap()
    }

    #[test]
    fn test_requires_one_elastic_component() {
        assert_eq!(
            Line::new(vec![Component::Percent]).unwrap_err(),
            LineError::NoElasticComponent
        );
        assert_eq!(
            Line::new(vec![
                Component::Bar(BarStyle::Plain),
                Component::Bar(BarStyle::Candy)
            ])
            .unwrap_err(),
            LineError::TooManyElasticComponents { count: 2 }
        );
    }

    #[test]
    fn test_render_fills_width() {
        let line = full_line();
        for width in [40, 80, 90, 200] {
            let out = line.render(&props(), width);
            assert_eq!(console::measure_text_width(&out), width);
        }
    }

    #[test]
    fn test_render_without_colors() {
        let out = full_line().with_colors(false).render(&props(), 60);
        assert!(!out.contains('\x1b'));
        assert_eq!(out.chars().count(), 60);
        assert!(out.starts_with("[1/3]  20% [#"));
        assert!(out.ends_with(" | ETA  : 00:00:40"));
    }

    #[test]
    fn test_render_truncates_when_too_narrow() {
        let out = full_line().with_colors(false).render(&props(), 10);
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn test_render_is_repeatable() {
        let line = full_line();
        assert_eq!(line.render(&props(), 70), line.render(&props(), 70));
    }
}
