//! Line filtering.
//!
//! Filtering is a single in-order pass over a source's lines. It runs only when the
//! user searches, toggles errors-only or replaces text, never while scrolling.

use crate::source::{LogSource, SourceColor};
use log::debug;
use memchr::memmem::Finder;
use std::sync::Arc;

/// Keyword matched by the errors-only predicate.
pub const ERROR_KEYWORD: &str = "error";

/// One line prepared for display, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewLine {
    pub text: String,
    /// Zero-based position within the originating source
    pub original_index: usize,
    pub source_name: Arc<str>,
    pub source_color: SourceColor,
}

/// Case-insensitive predicate combining an optional substring term with errors-only.
pub struct LineMatcher {
    term: Option<Finder<'static>>,
    error: Option<Finder<'static>>,
}

impl LineMatcher {
    /// An empty or absent term matches every line.
    pub fn new(term: Option<&str>, error_only: bool) -> Self {
        let term = term
            .filter(|term| !term.is_empty())
            .map(|term| Finder::new(term.to_lowercase().as_bytes()).into_owned());
        let error = error_only.then(|| Finder::new(ERROR_KEYWORD.as_bytes()).into_owned());
        Self { term, error }
    }

    /// True when no predicate is active.
    pub fn matches_all(&self) -> bool {
        self.term.is_none() && self.error.is_none()
    }

    pub fn is_match(&self, line: &str) -> bool {
        if self.matches_all() {
            return true;
        }

        let lowered = line.to_lowercase();
        let haystack = lowered.as_bytes();
        self.term
            .as_ref()
            .map_or(true, |finder| finder.find(haystack).is_some())
            && self
                .error
                .as_ref()
                .map_or(true, |finder| finder.find(haystack).is_some())
    }
}

/// Collect the lines of `source` matching `matcher` into `out`, preserving order.
pub fn filter_into(source: &LogSource, matcher: &LineMatcher, out: &mut Vec<ViewLine>) {
    let name: Arc<str> = Arc::from(source.name.as_str());
    out.extend(
        source
            .lines()
            .iter()
            .enumerate()
            .filter(|(_, line)| matcher.is_match(line))
            .map(|(index, line)| ViewLine {
                text: line.clone(),
                original_index: index,
                source_name: Arc::clone(&name),
                source_color: source.color,
            }),
    );
}

/// Lines of `source` that contain `term` (if any) and, when `error_only`, "error".
pub fn filter(source: &LogSource, term: Option<&str>, error_only: bool) -> Vec<ViewLine> {
    let matcher = LineMatcher::new(term, error_only);
    let mut visible = Vec::new();
    filter_into(source, &matcher, &mut visible);
    debug!(
        "filtered {}: {} of {} lines",
        source.name,
        visible.len(),
        source.line_count()
    );
    visible
}
