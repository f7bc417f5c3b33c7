//! Loaded log sources and the store that owns them.
//!
//! A [`LogSource`] is one imported log split into lines, or the synthetic query
//! source produced by a mass search. Lines are treated as opaque text.

pub mod palette;
pub mod store;
pub mod validation;

pub use palette::{Palette, SourceColor, DEFAULT_PALETTE, QUERY_COLOR};
pub use store::SourceStore;
pub use validation::validate_file_name;

use memchr::memchr_iter;

/// Reserved name of the synthetic mass-search source.
pub const SYNTHETIC_SOURCE_NAME: &str = "Query";

/// One loaded text source.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSource {
    pub name: String,
    pub color: SourceColor,
    pub(crate) lines: Vec<String>,
    pub is_synthetic: bool,
}

impl LogSource {
    pub(crate) fn new(name: impl Into<String>, color: SourceColor, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            color,
            lines,
            is_synthetic: false,
        }
    }

    pub(crate) fn synthetic(color: SourceColor, lines: Vec<String>) -> Self {
        Self {
            name: SYNTHETIC_SOURCE_NAME.to_string(),
            color,
            lines,
            is_synthetic: true,
        }
    }

    /// Lines in original order. Only the replace engine rewrites them.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Split raw text on `\n`, dropping a `\r` that precedes it.
///
/// Empty input yields no lines; a trailing newline yields a final empty line.
pub fn split_lines(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let bytes = raw.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    for newline in memchr_iter(b'\n', bytes) {
        lines.push(strip_cr(&raw[start..newline]).to_string());
        start = newline + 1;
    }
    lines.push(strip_cr(&raw[start..]).to_string());
    lines
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_split_mixed_line_endings() {
        assert_eq!(split_lines("a\r\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_trailing_newline() {
        assert_eq!(split_lines("one\ntwo\n"), vec!["one", "two", ""]);
        assert_eq!(split_lines("\n"), vec!["", ""]);
    }

    #[test]
    fn test_split_keeps_inner_carriage_return() {
        assert_eq!(split_lines("a\rb\r\n"), vec!["a\rb", ""]);
    }
}
