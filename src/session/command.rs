//! Discrete user actions understood by [`Session::execute`](super::Session::execute).

use super::export::ExportPayload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Import { file_name: String, raw_text: String },
    Close(String),
    Open(String),
    Search(String),
    MassSearch(String),
    ToggleErrorOnly,
    Replace { find: String, replace: String },
    ToggleChecked(String),
    Scroll(i64),
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,
    Resize(u64),
    Export,
}

impl Command {
    /// True for commands that rebuild the visible lines.
    pub fn refilters(&self) -> bool {
        matches!(
            self,
            Command::Import { .. }
                | Command::Close(_)
                | Command::Open(_)
                | Command::Search(_)
                | Command::MassSearch(_)
                | Command::ToggleErrorOnly
                | Command::Replace { .. }
        )
    }
}

/// What a successfully executed command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The view was rebuilt
    Updated,
    /// A filter or search produced this many visible lines
    Matches(usize),
    /// A replace rewrote this many lines
    Replaced(usize),
    /// Scroll changed (or did not change) the offset
    Scrolled(bool),
    /// The checked state of a source after toggling
    Checked(bool),
    Exported(ExportPayload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrolls_do_not_refilter() {
        assert!(!Command::Scroll(3).refilters());
        assert!(!Command::PageDown.refilters());
        assert!(!Command::Resize(40).refilters());
        assert!(!Command::Export.refilters());
        assert!(Command::ToggleErrorOnly.refilters());
        assert!(Command::Search("x".into()).refilters());
    }
}
