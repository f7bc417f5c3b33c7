//! File I/O for the terminal front end: reading logs to import and writing exports.
//!
//! The session itself never touches the file system; it only sees `(name, text)` pairs
//! and hands back export payloads.

use crate::error::{LogscopeError, Result};
use crate::session::{ExportPayload, Session};
use log::debug;
use std::path::{Path, PathBuf};

/// Read `path` as text. Invalid UTF-8 is replaced rather than rejected.
///
/// Returns the file name used as the source name, and the raw text.
pub async fn read_source(path: &Path) -> Result<(String, String)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            LogscopeError::invalid_argument(format!("not a file path: {}", path.display()))
        })?
        .to_string();

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| LogscopeError::file_error(format!("Cannot read {}", path.display()), err))?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok((file_name, String::from_utf8_lossy(&bytes).into_owned()))
}

/// Validate, read and import `path` into `session`.
///
/// The extension is checked before reading so unsupported files are never loaded.
pub async fn import_path(session: &mut Session, path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    session.check_file_name(file_name)?;

    let (file_name, raw_text) = read_source(path).await?;
    session.import(&file_name, &raw_text)?;
    Ok(file_name)
}

/// Write an export payload into `dir` under its suggested name.
pub async fn write_export(dir: &Path, payload: &ExportPayload) -> Result<PathBuf> {
    let target = dir.join(&payload.file_name);
    tokio::fs::write(&target, &payload.bytes)
        .await
        .map_err(|err| {
            LogscopeError::file_error(format!("Cannot write {}", target.display()), err)
        })?;
    Ok(target)
}
