//! Literal replace-all over real sources.
//!
//! Replacement rewrites lines one by one and never changes a source's line count, so
//! original indices stay structurally valid; any derived view must still be rebuilt.

use crate::error::{LogscopeError, Result};
use crate::source::SourceStore;
use log::info;

/// Replace every non-overlapping occurrence of `find`, scanning left to right.
///
/// Returns `None` when the line has no occurrence.
pub fn replace_line(line: &str, find: &str, replace: &str) -> Option<String> {
    line.contains(find).then(|| line.replace(find, replace))
}

/// Rewrite `targets` in order. Returns the number of lines changed.
///
/// Sources are processed one after another with no rollback. Unknown names and the
/// synthetic source are skipped.
///
/// # Error Cases
/// - `EmptySearchTerm` when `find` is empty
/// - `NoSourceSelected` when `targets` is empty
pub fn replace_all<S: AsRef<str>>(
    store: &mut SourceStore,
    find: &str,
    replace: &str,
    targets: &[S],
) -> Result<usize> {
    if find.is_empty() {
        return Err(LogscopeError::EmptySearchTerm);
    }
    if targets.is_empty() {
        return Err(LogscopeError::NoSourceSelected);
    }

    let mut changed = 0;
    for name in targets {
        let Some(source) = store.get_real_mut(name.as_ref()) else {
            continue;
        };

        let mut changed_here = 0;
        for line in source.lines.iter_mut() {
            if let Some(rewritten) = replace_line(line, find, replace) {
                *line = rewritten;
                changed_here += 1;
            }
        }
        info!(
            "replaced '{}' in {}: {} lines changed",
            find, source.name, changed_here
        );
        changed += changed_here;
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_non_overlapping_left_to_right() {
        assert_eq!(replace_line("banana", "ana", "X").as_deref(), Some("bXna"));
        assert_eq!(replace_line("aaaa", "aa", "b").as_deref(), Some("bb"));
        assert_eq!(replace_line("abc", "z", "y"), None);
    }

    #[test]
    fn test_empty_replacement_deletes() {
        assert_eq!(
            replace_line("[secret] token", "[secret] ", "").as_deref(),
            Some("token")
        );
    }

    #[test]
    fn test_replace_is_case_sensitive_and_literal() {
        assert_eq!(replace_line("Error error", "error", "E").as_deref(), Some("Error E"));
        assert_eq!(replace_line("a.b.c", ".", "-").as_deref(), Some("a-b-c"));
    }

    #[test]
    fn test_replace_all_targets_in_order() {
        let mut store = SourceStore::default();
        store.import("a.log", "banana\napple").unwrap();
        store.import("b.log", "ana\nnothing").unwrap();
        store.import("c.log", "ana").unwrap();

        let changed = replace_all(&mut store, "ana", "X", &["a.log", "b.log"]).unwrap();
        assert_eq!(changed, 2);
        assert_eq!(store.get("a.log").unwrap().lines(), ["bXna", "apple"]);
        assert_eq!(store.get("b.log").unwrap().lines(), ["X", "nothing"]);
        assert_eq!(store.get("c.log").unwrap().lines(), ["ana"]);
    }

    #[test]
    fn test_synthetic_is_never_rewritten() {
        let mut store = SourceStore::default();
        store.upsert_synthetic(vec!["ana".to_string()]);
        let changed = replace_all(&mut store, "ana", "X", &["Query"]).unwrap();
        assert_eq!(changed, 0);
        assert_eq!(store.synthetic().unwrap().lines(), ["ana"]);
    }

    #[test]
    fn test_validation() {
        let mut store = SourceStore::default();
        store.import("a.log", "x").unwrap();
        assert!(matches!(
            replace_all(&mut store, "", "y", &["a.log"]),
            Err(LogscopeError::EmptySearchTerm)
        ));
        let none: [&str; 0] = [];
        assert!(matches!(
            replace_all(&mut store, "x", "y", &none),
            Err(LogscopeError::NoSourceSelected)
        ));
        assert_eq!(store.get("a.log").unwrap().lines(), ["x"]);
    }

    proptest! {
        #[test]
        fn prop_replace_preserves_line_count(
            text in "[ab\n]{0,60}",
            find in "[ab]{1,3}",
            replacement in "[ab]{0,3}",
        ) {
            let mut store = SourceStore::default();
            store.import("p.log", &text).unwrap();
            let before = store.get("p.log").unwrap().line_count();

            replace_all(&mut store, &find, &replacement, &["p.log"]).unwrap();

            prop_assert_eq!(store.get("p.log").unwrap().line_count(), before);
        }
    }
}
