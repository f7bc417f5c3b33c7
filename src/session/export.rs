//! Export of the currently visible lines.

use crate::error::{LogscopeError, Result};
use crate::filter::ViewLine;

/// Bytes to hand to the collaborator along with a suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Suggested file name for an export of `active_source`.
pub fn export_file_name(active_source: Option<&str>) -> String {
    match active_source {
        Some(name) => format!("{name}_export.log"),
        None => "export.log".to_string(),
    }
}

/// Join the text of `lines` with `\n`.
///
/// # Error Cases
/// - `NoVisibleContent` when `lines` is empty
pub fn export_lines(active_source: Option<&str>, lines: &[ViewLine]) -> Result<ExportPayload> {
    if lines.is_empty() {
        return Err(LogscopeError::NoVisibleContent);
    }

    let capacity = lines.iter().map(|line| line.text.len() + 1).sum();
    let mut bytes = Vec::with_capacity(capacity);
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            bytes.push(b'\n');
        }
        bytes.extend_from_slice(line.text.as_bytes());
    }

    Ok(ExportPayload {
        file_name: export_file_name(active_source),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceColor;
    use std::sync::Arc;

    fn line(text: &str) -> ViewLine {
        ViewLine {
            text: text.to_string(),
            original_index: 0,
            source_name: Arc::from("a.log"),
            source_color: SourceColor::rgb(0, 0, 0),
        }
    }

    #[test]
    fn test_export_joins_without_trailing_newline() {
        let payload = export_lines(Some("a.log"), &[line("one"), line(""), line("three")]).unwrap();
        assert_eq!(payload.file_name, "a.log_export.log");
        assert_eq!(payload.bytes, b"one\n\nthree");
    }

    #[test]
    fn test_export_empty_fails() {
        assert!(matches!(
            export_lines(Some("a.log"), &[]),
            Err(LogscopeError::NoVisibleContent)
        ));
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(export_file_name(None), "export.log");
        assert_eq!(export_file_name(Some("Query")), "Query_export.log");
    }
}
