//! Text helpers: path shortening, transfer descriptions, speed and time formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::MAIN_SEPARATOR;
use std::time::Duration;

const SPEED_UNITS: [&str; 6] = ["B", "K", "M", "G", "T", "P"];

/// Shorten a string to at most `length` characters, marking the cut with dots.
///
/// Never returns fewer than one character for a non-empty input.
///
/// ```rust,ignore
/// assert_eq!(shorten_string("foobar", 5), "fo...");
/// assert_eq!(shorten_string("foobar", 1), "f");
/// ```
#[must_use]
pub fn shorten_string(input: &str, length: usize) -> String {
    if input.chars().count() <= length {
        return input.to_string();
    }

    let head = |n: usize| input.chars().take(n).collect::<String>();
    match length {
        0 | 1 => head(1),
        2 => head(1) + ".",
        3 => head(1) + "..",
        _ => head(length - 3) + "...",
    }
}

/// Shorten a path to fit in `length` characters.
///
/// Every ancestor directory is reduced to its first letter and the final
/// segment is truncated with [`shorten_string`]. When even the initials do not
/// fit, only the (truncated) final segment is kept.
///
/// ```rust,ignore
/// assert_eq!(shorten_path("foo/bar/baz", 10), "f/b/baz");
/// assert_eq!(shorten_path("foo/bar/baz/spam/eggs", 6), "eggs");
/// ```
#[must_use]
pub fn shorten_path(path: &str, length: usize) -> String {
    if path.chars().count() <= length {
        return path.to_string();
    }

    if !path.contains(MAIN_SEPARATOR) {
        return shorten_string(path, length);
    }

    let (root, rest) = path
        .strip_prefix(MAIN_SEPARATOR)
        .map_or(("", path), |rest| (&path[..MAIN_SEPARATOR.len_utf8()], rest));
    let rest = rest.trim_end_matches(MAIN_SEPARATOR);

    let mut parts: Vec<&str> = rest.split(MAIN_SEPARATOR).collect();
    let name = parts.pop().unwrap_or_default();
    let initials: Vec<String> = parts
        .iter()
        .filter_map(|part| part.chars().next())
        .map(String::from)
        .collect();

    let mut base = root.to_string();
    base.push_str(&initials.join(&MAIN_SEPARATOR.to_string()));
    let needs_separator = !initials.is_empty();

    // The initials only stay if at least one character of the name fits after them
    let base_len = base.chars().count();
    let separator_len = usize::from(needs_separator);
    if base_len + separator_len + 1 > length {
        return shorten_string(name, length);
    }

    let name = shorten_string(name, length.saturating_sub(base_len + separator_len));
    if needs_separator {
        base.push(MAIN_SEPARATOR);
    }
    base.push_str(&name);
    base
}

/// Describe a transfer from `src` to `dest`, factoring out their common parts.
///
/// Common prefixes and suffixes are only recognized on separator boundaries,
/// the way `git diff --stat` prints renames:
///
/// ```rust,ignore
/// assert_eq!(transfer_description("/path/to/foo", "/path/to/bar"), "/path/to/{foo => bar}");
/// assert_eq!(transfer_description("a", "b"), "a => b");
/// ```
#[must_use]
pub fn transfer_description(src: &str, dest: &str) -> String {
    let src_chars: Vec<char> = src.chars().collect();
    let dest_chars: Vec<char> = dest.chars().collect();
    let len_src = src_chars.len();
    let len_dest = dest_chars.len();

    let mut pfx_length = 0;
    let mut i = 0;
    while i < len_src && i < len_dest && src_chars[i] == dest_chars[i] {
        if src_chars[i] == MAIN_SEPARATOR {
            pfx_length = i + 1;
        }
        i += 1;
    }

    let mut sfx_length = 0;
    if len_src > 0 && len_dest > 0 {
        let mut i = len_src - 1;
        let mut j = len_dest - 1;
        while i > 0 && j > 0 && src_chars[i] == dest_chars[j] {
            if src_chars[i] == MAIN_SEPARATOR {
                sfx_length = len_src - i;
            }
            i -= 1;
            j -= 1;
        }
    }

    let src_midlen = len_src.saturating_sub(pfx_length + sfx_length);
    let dest_midlen = len_dest.saturating_sub(pfx_length + sfx_length);

    let collect = |chars: &[char]| chars.iter().collect::<String>();
    let mut pfx = collect(&src_chars[..pfx_length]);
    let sfx = collect(&dest_chars[len_dest - sfx_length..]);
    let mut src_mid = collect(&src_chars[pfx_length..pfx_length + src_midlen]);
    let mut dest_mid = collect(&dest_chars[pfx_length..pfx_length + dest_midlen]);

    // A lone root is not worth factoring out: print {/etc => /tmp}/foo
    if pfx.len() == MAIN_SEPARATOR.len_utf8() && pfx.starts_with(MAIN_SEPARATOR) {
        pfx.clear();
        src_mid.insert(0, MAIN_SEPARATOR);
        dest_mid.insert(0, MAIN_SEPARATOR);
    }

    if pfx.is_empty() && sfx.is_empty() {
        return format!("{src} => {dest}");
    }

    format!("{pfx}{{{src_mid} => {dest_mid}}}{sfx}")
}

/// Format a transfer speed in bytes per second, e.g. `" 12.50 M/s"`.
///
/// Units are scaled by powers of 1000 until the magnitude drops below 1000.
#[must_use]
pub fn format_speed(bytes_per_second: f64) -> String {
    let mut speed = bytes_per_second;
    let mut unit = SPEED_UNITS[0];
    for candidate in SPEED_UNITS {
        unit = candidate;
        if speed < 1000.0 {
            break;
        }
        speed /= 1000.0;
    }
    format!("{speed:6.2} {unit}/s")
}

/// Format a duration as `HH:MM:SS`.
#[must_use]
pub fn format_time(duration: Duration) -> String {
    let seconds = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
