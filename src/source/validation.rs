//! Import validation.
//!
//! Only plain-text log files are accepted; the check runs before any state changes.

use crate::error::{LogscopeError, Result};

/// Extensions accepted when no configuration overrides them.
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["log", "txt"];

/// Validate that `file_name` ends in `.` plus one of `accepted` (case-insensitive).
///
/// Only the suffix after the last dot is compared, so dotfiles such as `.log` are
/// accepted too.
///
/// # Error Cases
/// - No dot in the name
/// - Suffix not in `accepted`
pub fn validate_file_name<S: AsRef<str>>(file_name: &str, accepted: &[S]) -> Result<()> {
    let (_, extension) = file_name
        .rsplit_once('.')
        .ok_or_else(|| LogscopeError::file_type_unsupported(file_name))?;

    if accepted
        .iter()
        .any(|allowed| allowed.as_ref().eq_ignore_ascii_case(extension))
    {
        Ok(())
    } else {
        Err(LogscopeError::file_type_unsupported(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_log_and_txt() {
        assert!(validate_file_name("app.log", &DEFAULT_EXTENSIONS).is_ok());
        assert!(validate_file_name("notes.txt", &DEFAULT_EXTENSIONS).is_ok());
        assert!(validate_file_name("SERVER.LOG", &DEFAULT_EXTENSIONS).is_ok());
        assert!(validate_file_name("archive.2024.Txt", &DEFAULT_EXTENSIONS).is_ok());
        assert!(validate_file_name(".log", &DEFAULT_EXTENSIONS).is_ok());
        assert!(validate_file_name(".TXT", &DEFAULT_EXTENSIONS).is_ok());
    }

    #[test]
    fn test_rejects_other_extensions() {
        let rejected_names = [
            "image.png",
            "app.log.gz",
            "README",
            "log",
            ".log.bak",
            "app.",
            "app.log/",
        ];
        for name in rejected_names {
            match validate_file_name(name, &DEFAULT_EXTENSIONS) {
                Err(LogscopeError::FileTypeUnsupported { name: rejected }) => {
                    assert_eq!(rejected, name);
                }
                other => panic!("expected FileTypeUnsupported for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_custom_extension_list() {
        let accepted = vec!["out".to_string()];
        assert!(validate_file_name("build.out", &accepted).is_ok());
        assert!(validate_file_name("build.log", &accepted).is_err());
    }
}
