//! Mass search: one term, several sources, one merged result.
//!
//! Results are grouped by the order sources were selected in, then by line order
//! within each source. Nothing is interleaved by position across sources.

use crate::error::{LogscopeError, Result};
use crate::filter::{filter_into, LineMatcher, ViewLine};
use crate::source::SourceStore;
use log::debug;

/// Parameters of the last mass search, kept so it can be re-run after a replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassQuery {
    pub term: String,
    pub selected: Vec<String>,
}

/// Search `term` across `selected` real sources.
///
/// # Error Cases
/// - `EmptySearchTerm` when `term` is empty
/// - `NoSourceChecked` when `selected` is empty
pub fn mass_search<S: AsRef<str>>(
    store: &SourceStore,
    term: &str,
    selected: &[S],
    error_only: bool,
) -> Result<Vec<ViewLine>> {
    if term.is_empty() {
        return Err(LogscopeError::EmptySearchTerm);
    }
    if selected.is_empty() {
        return Err(LogscopeError::NoSourceChecked);
    }
    Ok(aggregate(store, term, selected, error_only))
}

/// Unvalidated aggregation. Names that are unknown or synthetic are skipped.
pub(crate) fn aggregate<S: AsRef<str>>(
    store: &SourceStore,
    term: &str,
    selected: &[S],
    error_only: bool,
) -> Vec<ViewLine> {
    let matcher = LineMatcher::new(Some(term), error_only);
    let mut hits = Vec::new();

    for name in selected {
        let Some(source) = store.get(name.as_ref()).filter(|source| !source.is_synthetic) else {
            continue;
        };
        filter_into(source, &matcher, &mut hits);
    }

    debug!(
        "mass search '{}' across {} sources: {} hits",
        term,
        selected.len(),
        hits.len()
    );
    hits
}
